use crate::error::{AppError, Result};
use crate::sheets::{
    DriveOperations, FileMetadata, SPREADSHEET_MIME_TYPE, SheetOperations, SpreadsheetHandle,
};
use chrono::NaiveDate;
use tracing::{info, instrument};

const FILE_NAME_PREFIX: &str = "Payout Report";

pub fn report_file_name(date: NaiveDate) -> String {
    format!("{} {}", FILE_NAME_PREFIX, date.format("%Y-%m-%d"))
}

/// Create a new spreadsheet file named after `date`.
///
/// Every call allocates a new file in Drive; there is no lookup of an
/// existing report.
#[instrument(name = "Provisioning spreadsheet", skip(client))]
pub async fn provision<C>(client: &C, date: NaiveDate) -> Result<SpreadsheetHandle>
where
    C: DriveOperations + SheetOperations,
{
    let metadata = FileMetadata {
        name: report_file_name(date),
        mime_type: SPREADSHEET_MIME_TYPE.to_string(),
    };

    let id = client
        .create_file(&metadata)
        .await?
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Provisioning("Failed to create spreadsheet".to_string()))?;

    let handle = client.load(&id).await?;
    info!(spreadsheet_id = %handle.id, title = %handle.title, "Spreadsheet created");

    Ok(handle)
}
