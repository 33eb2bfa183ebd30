use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ItdashError {
    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("no element matches {xpath}")]
    ElementNotFound { xpath: String },

    #[error("timed out after {secs}s waiting for {what}")]
    WaitTimeout { what: String, secs: u64 },

    #[error("agency '{agency}' is not listed on the dashboard")]
    AgencyNotFound { agency: String },

    #[error("listing has {len} text nodes; amounts and names must come in pairs")]
    UnpairedListing { len: usize },

    #[error("table has no header cells")]
    EmptyHeader,

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("field '{field}' not found on the first page of the business case")]
    FieldNotFound { field: &'static str },

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("sheet '{sheet}' already exists in {path}")]
    SheetExists { sheet: String, path: PathBuf },

    #[error("sheet '{sheet}' not found in {path}")]
    SheetNotFound { sheet: String, path: PathBuf },

    #[error("column '{column}' not found in sheet '{sheet}'")]
    ColumnNotFound { column: String, sheet: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
