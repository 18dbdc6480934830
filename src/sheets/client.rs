use super::formatting::format_requests;
use super::{
    CreatedFile, DriveOperations, FileMetadata, SheetOperations, SpreadsheetHandle, Worksheet,
};
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::report::{CellValue, FormatEdit, Row};
use crate::sheets::auth::create_and_verify_authenticator;
use async_trait::async_trait;
use google_drive3::api::File;
use google_drive3::api::DriveHub;
use google_sheets4::api::{
    AddSheetRequest, BatchUpdateSpreadsheetRequest, Request, Scope, SheetProperties, ValueRange,
};
use google_sheets4::Sheets;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use std::io::Cursor;
use tracing::{debug, instrument};

// Access to files created or opened by the app
pub(crate) const AUTH_SCOPE: Scope = Scope::DriveFile;

type Connector = HttpsConnector<HttpConnector>;

pub struct SheetsClient {
    sheets: Sheets<Connector>,
    drive: DriveHub<Connector>,
}

impl SheetsClient {
    /// Create a new SheetsClient with authenticated access to Drive and Sheets
    #[instrument(name = "Authenticating to Google", skip_all)]
    pub async fn new(config: &GoogleConfig) -> Result<Self> {
        let auth = create_and_verify_authenticator(config).await?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| AppError::Auth(format!("Failed to load native TLS roots: {}", e)))?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

        Ok(Self {
            sheets: Sheets::new(client.clone(), auth.clone()),
            drive: DriveHub::new(client, auth),
        })
    }
}

#[async_trait]
impl DriveOperations for SheetsClient {
    #[instrument(name = "Creating spreadsheet file", skip(self))]
    async fn create_file(&self, metadata: &FileMetadata) -> Result<CreatedFile> {
        let file = File {
            name: Some(metadata.name.clone()),
            mime_type: Some(metadata.mime_type.clone()),
            ..Default::default()
        };

        let (media, media_type) = empty_media();
        let (_, created) = self
            .drive
            .files()
            .create(file)
            .param("fields", "id")
            .add_scope(AUTH_SCOPE)
            .upload(media, media_type)
            .await
            .map_err(|e| AppError::Provisioning(format!("Failed to create spreadsheet: {}", e)))?;

        debug!(id = ?created.id, "Created file");

        Ok(CreatedFile { id: created.id })
    }
}

#[async_trait]
impl SheetOperations for SheetsClient {
    #[instrument(name = "Loading spreadsheet", skip(self))]
    async fn load(&self, spreadsheet_id: &str) -> Result<SpreadsheetHandle> {
        let (_, spreadsheet) = self
            .sheets
            .spreadsheets()
            .get(spreadsheet_id)
            .include_grid_data(false)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::RemoteOperation(format!("Failed to load spreadsheet: {}", e)))?;

        Ok(SpreadsheetHandle {
            id: spreadsheet
                .spreadsheet_id
                .unwrap_or_else(|| spreadsheet_id.to_string()),
            title: spreadsheet
                .properties
                .and_then(|props| props.title)
                .unwrap_or_default(),
        })
    }

    #[instrument(name = "Adding sheet", skip(self, handle, header), fields(spreadsheet_id = %handle.id))]
    async fn add_sheet(
        &self,
        handle: &SpreadsheetHandle,
        title: &str,
        header: &[String],
    ) -> Result<Worksheet> {
        let request = Request {
            add_sheet: Some(AddSheetRequest {
                properties: Some(SheetProperties {
                    title: Some(title.to_string()),
                    sheet_type: Some("GRID".to_string()),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        };

        let batch_update = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![request]),
            ..Default::default()
        };

        let (_, response) = self
            .sheets
            .spreadsheets()
            .batch_update(batch_update, &handle.id)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::RemoteOperation(format!("Failed to create sheet: {}", e)))?;

        let sheet_id = response
            .replies
            .and_then(|replies| replies.into_iter().next())
            .and_then(|reply| reply.add_sheet)
            .and_then(|add_sheet| add_sheet.properties)
            .and_then(|props| props.sheet_id)
            .ok_or_else(|| {
                AppError::RemoteOperation("Created sheet has no sheet ID".to_string())
            })?;

        let worksheet = Worksheet {
            sheet_id,
            title: title.to_string(),
        };

        let header_range = sheet_range(title, "A1");
        let value_range = ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some(header_range.clone()),
            values: Some(vec![header.iter().cloned().map(Value::String).collect()]),
        };

        self.sheets
            .spreadsheets()
            .values_update(value_range, &handle.id, &header_range)
            .value_input_option("RAW")
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::RemoteOperation(format!("Failed to write header row: {}", e)))?;

        debug!(sheet_id, "Created sheet");

        Ok(worksheet)
    }

    #[instrument(name = "Appending rows", skip_all, fields(rows = rows.len()))]
    async fn add_rows(
        &self,
        handle: &SpreadsheetHandle,
        worksheet: &Worksheet,
        rows: &[Row],
    ) -> Result<()> {
        let range = sheet_range(&worksheet.title, "A1");
        let value_range = ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some(range.clone()),
            values: Some(rows.iter().map(row_values).collect()),
        };

        self.sheets
            .spreadsheets()
            .values_append(value_range, &handle.id, &range)
            .value_input_option("RAW")
            .insert_data_option("INSERT_ROWS")
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::RemoteOperation(format!("Failed to append rows: {}", e)))?;

        Ok(())
    }

    #[instrument(name = "Loading cells", skip(self, handle, worksheet))]
    async fn load_cells(
        &self,
        handle: &SpreadsheetHandle,
        worksheet: &Worksheet,
        range: &str,
    ) -> Result<usize> {
        let (_, response) = self
            .sheets
            .spreadsheets()
            .values_get(&handle.id, &sheet_range(&worksheet.title, range))
            .major_dimension("ROWS")
            .value_render_option("UNFORMATTED_VALUE")
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| {
                AppError::RemoteOperation(format!("Failed to load cells {}: {}", range, e))
            })?;

        Ok(response.values.map(|values| values.len()).unwrap_or(0))
    }

    #[instrument(name = "Saving cell formats", skip_all, fields(edits = edits.len()))]
    async fn save_updated_cells(
        &self,
        handle: &SpreadsheetHandle,
        worksheet: &Worksheet,
        edits: &[FormatEdit],
    ) -> Result<()> {
        let requests = format_requests(worksheet.sheet_id, edits);
        if requests.is_empty() {
            return Ok(());
        }

        let batch_update = BatchUpdateSpreadsheetRequest {
            requests: Some(requests),
            ..Default::default()
        };

        self.sheets
            .spreadsheets()
            .batch_update(batch_update, &handle.id)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::RemoteOperation(format!("Failed to apply formatting: {}", e)))?;

        Ok(())
    }
}

/// Media body for a metadata-only create. Drive converts the empty CSV into
/// a blank spreadsheet because the metadata MIME type is a Google Sheet.
fn empty_media() -> (Cursor<Vec<u8>>, mime::Mime) {
    (Cursor::new(Vec::new()), mime::TEXT_CSV)
}

/// Qualify an A1 range with its sheet title, e.g. `'Payout Report'!A1`.
fn sheet_range(title: &str, range: &str) -> String {
    format!("'{}'!{}", title.replace('\'', "''"), range)
}

fn row_values(row: &Row) -> Vec<Value> {
    row.iter()
        .map(|cell| match cell {
            CellValue::Text(text) => Value::String(text.clone()),
            CellValue::Number(number) => number
                .to_f64()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(number.to_string())),
        })
        .collect()
}
