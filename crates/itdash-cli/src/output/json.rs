use itdash_core::error::ItdashError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), ItdashError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
