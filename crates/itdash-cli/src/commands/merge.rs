use itdash_core::error::ItdashError;
use itdash_core::extraction::pdftotext::PdftotextExtractor;
use std::path::Path;

use super::{load_config, Overrides};
use crate::output;

pub fn run(config_path: &Path, overrides: Overrides, output_format: &str) -> Result<(), ItdashError> {
    let config = load_config(config_path, overrides)?;
    let summary = itdash_core::compare_pdfs(&config, &PdftotextExtractor::new())?;

    match output_format {
        "json" => output::json::print(&summary)?,
        _ => {
            output::table::print_compare(&summary);
            println!("Workbook written to {}", config.output.display());
        }
    }

    Ok(())
}
