use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ItdashError;
use crate::workbook::SheetCollision;

pub const DEFAULT_CONFIG_PATH: &str = "config/common.json";
pub const DEFAULT_URL: &str = "https://itdashboard.gov/";
pub const DEFAULT_OUTPUT: &str = "output/output.xlsx";

/// Run settings, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the browser downloads business case PDFs into.
    pub pdf_path: PathBuf,
    /// Agency display name, matched exactly against the dashboard tiles.
    pub agency: String,
    #[serde(default = "default_url")]
    pub url: String,
    /// Workbook the sheets are written to.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_true")]
    pub headless: bool,
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,
    /// Skip investments whose `<UII>.pdf` is already in `pdf_path`.
    #[serde(default)]
    pub skip_downloaded: bool,
    #[serde(default)]
    pub sheet_collision: SheetCollision,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn new(pdf_path: impl Into<PathBuf>, agency: impl Into<String>) -> Self {
        Config {
            pdf_path: pdf_path.into(),
            agency: agency.into(),
            url: default_url(),
            output: default_output(),
            headless: true,
            chrome_path: None,
            skip_downloaded: false,
            sheet_collision: SheetCollision::default(),
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<Config, ItdashError> {
    let content = std::fs::read_to_string(path).map_err(|e| ItdashError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: Config = serde_json::from_str(&content).map_err(|e| ItdashError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<Config, ItdashError> {
    let config: Config = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<(), ItdashError> {
    if config.agency.trim().is_empty() {
        return Err(ItdashError::ConfigInvalid("agency must not be empty".into()));
    }

    if config.pdf_path.as_os_str().is_empty() {
        return Err(ItdashError::ConfigInvalid("pdf_path must not be empty".into()));
    }

    if !(config.url.starts_with("http://") || config.url.starts_with("https://")) {
        return Err(ItdashError::ConfigInvalid(format!(
            "url '{}' must start with http:// or https://",
            config.url
        )));
    }

    let is_xlsx = config
        .output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if !is_xlsx {
        return Err(ItdashError::ConfigInvalid(format!(
            "output '{}' must be an .xlsx file",
            config.output.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let json = r#"{ "pdf_path": "output/pdfs", "agency": "Department of Education" }"#;
        let config = parse_config_str(json).unwrap();
        assert_eq!(config.agency, "Department of Education");
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(config.headless);
        assert!(!config.skip_downloaded);
        assert_eq!(config.sheet_collision, SheetCollision::Error);
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "pdf_path": "/tmp/pdfs",
            "agency": "Department of Commerce",
            "url": "http://localhost:8080",
            "output": "report.xlsx",
            "headless": false,
            "skip_downloaded": true,
            "sheet_collision": "replace"
        }"#;
        let config = parse_config_str(json).unwrap();
        assert!(!config.headless);
        assert!(config.skip_downloaded);
        assert_eq!(config.sheet_collision, SheetCollision::Replace);
    }

    #[test]
    fn test_missing_agency_rejected() {
        assert!(parse_config_str(r#"{ "pdf_path": "pdfs" }"#).is_err());
        assert!(parse_config_str(r#"{ "pdf_path": "pdfs", "agency": "  " }"#).is_err());
    }

    #[test]
    fn test_non_xlsx_output_rejected() {
        let json = r#"{ "pdf_path": "pdfs", "agency": "A", "output": "out.csv" }"#;
        assert!(matches!(
            parse_config_str(json),
            Err(ItdashError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_load_config_reports_path() {
        let err = load_config(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ItdashError::ConfigLoad { .. }));
    }
}
