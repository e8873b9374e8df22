use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("Sheet is empty or has no header row")]
    EmptySheet,

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' has no parseable values in {rows} rows")]
    UnparseableColumn { column: String, rows: usize },

    #[error("Boundary download from {url} failed with status {status}")]
    BoundaryFetch { url: String, status: u16 },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
