pub mod agencies;
pub mod extract;
pub mod merge;
pub mod run;

use clap::Args;
use itdash_core::browser::chrome::ChromeOptions;
use itdash_core::config::{self, Config};
use itdash_core::error::ItdashError;
use std::path::{Path, PathBuf};

/// Command-line values that win over the config file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Agency display name, as shown on the dashboard
    #[arg(long)]
    pub agency: Option<String>,

    /// Directory for downloaded business case PDFs
    #[arg(long, value_name = "DIR")]
    pub pdf_dir: Option<PathBuf>,

    /// Workbook to write (.xlsx)
    #[arg(long = "workbook", value_name = "FILE")]
    pub workbook: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

pub fn load_config(path: &Path, overrides: Overrides) -> Result<Config, ItdashError> {
    let mut config = config::load_config(path)?;

    if let Some(agency) = overrides.agency {
        config.agency = agency;
    }
    if let Some(dir) = overrides.pdf_dir {
        config.pdf_path = dir;
    }
    if let Some(workbook) = overrides.workbook {
        config.output = workbook;
    }
    if overrides.headed {
        config.headless = false;
    }

    config::validate_config(&config)?;
    Ok(config)
}

pub fn chrome_options(config: &Config) -> ChromeOptions {
    ChromeOptions {
        headless: config.headless,
        download_dir: config.pdf_path.clone(),
        chrome_path: config.chrome_path.clone(),
    }
}
