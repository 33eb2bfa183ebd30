use itdash_core::browser::chrome::ChromeDriver;
use itdash_core::browser::Session;
use itdash_core::dashboard::Timeouts;
use itdash_core::error::ItdashError;
use itdash_core::extraction::pdftotext::PdftotextExtractor;
use itdash_core::{CompareSummary, ScrapeSummary};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use super::{chrome_options, load_config, Overrides};
use crate::output;

#[derive(Serialize)]
struct RunReport<'a> {
    scrape: &'a ScrapeSummary,
    compare: &'a CompareSummary,
}

pub fn run(config_path: &Path, overrides: Overrides, output_format: &str) -> Result<(), ItdashError> {
    let config = load_config(config_path, overrides)?;

    // Checked up front: the comparison step runs after every download.
    if !PdftotextExtractor::is_available() {
        return Err(ItdashError::PdftotextNotFound);
    }

    let driver = ChromeDriver::launch(&chrome_options(&config))?;
    let session = Session::new(driver);
    let scraped = itdash_core::scrape_dashboard(&session, &config, Timeouts::default());
    if let Err(e) = session.close() {
        warn!("failed to close browser: {e}");
    }
    let scraped = scraped?;

    info!(workbook = %config.output.display(), "comparing business cases with the investments sheet");
    let compared = itdash_core::compare_pdfs(&config, &PdftotextExtractor::new())?;

    match output_format {
        "json" => output::json::print(&RunReport {
            scrape: &scraped,
            compare: &compared,
        })?,
        _ => {
            output::table::print_scrape(&scraped);
            output::table::print_compare(&compared);
            println!("Workbook written to {}", config.output.display());
        }
    }

    Ok(())
}
