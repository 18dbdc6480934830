mod auth;
mod client;
mod formatting;

pub use client::SheetsClient;

// Re-export clear_tokens for CLI usage
pub use auth::{clear_tokens as clear_sheets_tokens, token_cache_path};

use crate::error::Result;
use crate::report::{FormatEdit, Row};
use async_trait::async_trait;

pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    pub name: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedFile {
    pub id: Option<String>,
}

/// Reference to a spreadsheet owned by Google.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetHandle {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub sheet_id: i32,
    pub title: String,
}

#[async_trait]
pub trait DriveOperations: Send + Sync {
    async fn create_file(&self, metadata: &FileMetadata) -> Result<CreatedFile>;
}

#[async_trait]
pub trait SheetOperations: Send + Sync {
    async fn load(&self, spreadsheet_id: &str) -> Result<SpreadsheetHandle>;

    /// Add a worksheet and write `header` as its first row.
    async fn add_sheet(
        &self,
        handle: &SpreadsheetHandle,
        title: &str,
        header: &[String],
    ) -> Result<Worksheet>;

    /// Append rows below the last written row.
    async fn add_rows(
        &self,
        handle: &SpreadsheetHandle,
        worksheet: &Worksheet,
        rows: &[Row],
    ) -> Result<()>;

    async fn add_row(
        &self,
        handle: &SpreadsheetHandle,
        worksheet: &Worksheet,
        row: &Row,
    ) -> Result<()> {
        self.add_rows(handle, worksheet, std::slice::from_ref(row))
            .await
    }

    /// Fetch an A1 range and return how many rows it holds.
    async fn load_cells(
        &self,
        handle: &SpreadsheetHandle,
        worksheet: &Worksheet,
        range: &str,
    ) -> Result<usize>;

    /// Commit all format edits in one batch update.
    async fn save_updated_cells(
        &self,
        handle: &SpreadsheetHandle,
        worksheet: &Worksheet,
        edits: &[FormatEdit],
    ) -> Result<()>;
}
