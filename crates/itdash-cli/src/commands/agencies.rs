use itdash_core::browser::chrome::ChromeDriver;
use itdash_core::browser::Session;
use itdash_core::dashboard::{Dashboard, Timeouts};
use itdash_core::error::ItdashError;
use itdash_core::model::Table;
use itdash_core::workbook::{self, WriteMode};
use itdash_core::AGENCIES_SHEET;
use std::path::Path;

use super::{chrome_options, load_config, Overrides};
use crate::output;

pub fn run(
    config_path: &Path,
    overrides: Overrides,
    save: bool,
    output_format: &str,
) -> Result<(), ItdashError> {
    let config = load_config(config_path, overrides)?;

    let session = Session::new(ChromeDriver::launch(&chrome_options(&config))?);
    let agencies = {
        let dashboard = Dashboard::new(session.driver(), Timeouts::default());
        dashboard.open(&config.url)?;
        dashboard.agencies()?
    };
    session.close()?;

    if save {
        workbook::write_sheet(
            &config.output,
            AGENCIES_SHEET,
            &Table::from(agencies.as_slice()),
            WriteMode::Create,
        )?;
        eprintln!(
            "Saved {} agencies to {} (sheet '{}')",
            agencies.len(),
            config.output.display(),
            AGENCIES_SHEET
        );
    }

    match output_format {
        "json" => output::json::print(&agencies)?,
        _ => output::table::print_agencies(&agencies),
    }

    Ok(())
}
