use super::provisioner::provision;
use super::share_url;
use crate::error::{AppError, Result};
use crate::models::{ExportResult, PayoutRecord};
use crate::report::layout::SHEET_TITLE;
use crate::report::{ReportLayout, format_plan};
use crate::sheets::{DriveOperations, SheetOperations, SpreadsheetHandle};
use chrono::{NaiveDate, Utc};
use indicatif::ProgressStyle;
use tracing::{Span, error, info, instrument, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const FALLBACK_ERROR: &str = "Failed to export to Google Sheets";

// Provision, header, data rows, total row, load cells, format
const EXPORT_STEPS: u64 = 6;

pub struct PayoutExporter<C> {
    client: C,
}

impl<C> PayoutExporter<C>
where
    C: DriveOperations + SheetOperations,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Export `records` to a freshly provisioned spreadsheet.
    ///
    /// Never fails: every error is logged and folded into the result. A
    /// spreadsheet that was provisioned before a later step failed is left
    /// in place.
    pub async fn export(&self, records: &[PayoutRecord]) -> ExportResult {
        self.export_on(records, Utc::now().date_naive()).await
    }

    #[instrument(name = "Exporting payout report", skip_all, fields(records = records.len()))]
    pub async fn export_on(&self, records: &[PayoutRecord], date: NaiveDate) -> ExportResult {
        match self.try_export(records, date).await {
            Ok(url) => {
                info!(url = %url, "Export completed");
                ExportResult::succeeded(url)
            }
            Err(e) => {
                error!(error = %e, "Export failed");
                let message = e.to_string();
                match message.is_empty() {
                    true => ExportResult::failed(FALLBACK_ERROR.to_string()),
                    false => ExportResult::failed(message),
                }
            }
        }
    }

    async fn try_export(&self, records: &[PayoutRecord], date: NaiveDate) -> Result<String> {
        if records.is_empty() {
            return Err(AppError::Validation("No data to export".to_string()));
        }

        let span = Span::current();
        span.pb_set_style(
            &ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .map_err(|e| AppError::Other(e.into()))?,
        );
        span.pb_set_length(EXPORT_STEPS);
        span.pb_set_message("Provisioning spreadsheet");

        let layout = ReportLayout::new(records);
        let handle = provision(&self.client, date).await?;
        span.pb_inc(1);

        if let Err(e) = self.populate(&handle, &layout).await {
            warn!(spreadsheet_id = %handle.id, "Spreadsheet left partially written");
            return Err(e);
        }

        share_url(&handle.id)
    }

    async fn populate(&self, handle: &SpreadsheetHandle, layout: &ReportLayout) -> Result<()> {
        let span = Span::current();

        span.pb_set_message("Writing header");
        let worksheet = self
            .client
            .add_sheet(handle, SHEET_TITLE, &layout.header)
            .await?;
        span.pb_inc(1);

        span.pb_set_message("Writing rows");
        self.client
            .add_rows(handle, &worksheet, &layout.data)
            .await?;
        span.pb_inc(1);

        self.client
            .add_row(handle, &worksheet, &layout.total)
            .await?;
        span.pb_inc(1);

        span.pb_set_message("Formatting");
        let range = layout.used_range_a1();
        let loaded = self.client.load_cells(handle, &worksheet, &range).await?;
        if loaded != layout.row_count() {
            return Err(AppError::RemoteOperation(format!(
                "Expected {} rows in {}, found {}",
                layout.row_count(),
                range,
                loaded
            )));
        }
        span.pb_inc(1);

        self.client
            .save_updated_cells(handle, &worksheet, &format_plan(layout))
            .await?;
        span.pb_inc(1);

        Ok(())
    }
}
