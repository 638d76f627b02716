use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Credential error: {0}")]
    Credentials(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Sheets API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Spreadsheet has no worksheets")]
    NoWorksheet,

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// A single data row, addressed by its 1-based sheet row number.
///
/// Row 1 is the `Key`/`Value` header, so data rows start at 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub row_number: u32,
    pub key: String,
    pub value: String,
}

#[async_trait]
pub trait SheetClient: Send + Sync {
    /// Authenticate and return a live handle to the first worksheet.
    ///
    /// Called once per request; no session or token is reused across calls.
    async fn connect(&self) -> Result<Box<dyn Worksheet>, SheetError>;
}

#[async_trait]
pub trait Worksheet: Send + Sync {
    /// Fetch every data row in sheet order, header excluded.
    async fn rows(&self) -> Result<Vec<Row>, SheetError>;

    /// Overwrite the Value cell of an existing row.
    async fn update_value(&self, row: &Row, value: &str) -> Result<(), SheetError>;

    /// Append a new key/value row after the last data row.
    async fn append(&self, key: &str, value: &str) -> Result<(), SheetError>;

    /// Remove a row entirely. Rows below it shift up by one.
    async fn delete(&self, row: &Row) -> Result<(), SheetError>;
}
