use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("Balance sheet anchor row '{marker}' not found in the first {searched} rows")]
    SchemaNotFound { marker: String, searched: usize },

    #[error("No year columns selected (first year: {first_year:?}, last year: {last_year:?})")]
    EmptyYearRange {
        first_year: Option<i64>,
        last_year: Option<i64>,
    },

    #[error("Malformed section at table row {row}: {details}")]
    MalformedSection { row: usize, details: String },

    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    #[error("Update check failed: {0}")]
    UpdateCheck(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Document archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Document XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NarrativeError>;
