use crate::config::Config;
use crate::error::{AppError, Result};
use crate::export::PayoutExporter;
use crate::models::PayoutRecord;
use crate::sheets::SheetsClient;
use std::path::Path;
use tracing::info;

pub async fn execute(file: &Path, json: bool) -> Result<()> {
    let records = PayoutRecord::load(file)?;
    info!(count = records.len(), file = ?file, "Loaded payout records");

    let config = Config::load()?;
    let client = SheetsClient::new(&config.google).await?;

    let result = PayoutExporter::new(client).export(&records).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    match (result.success, result.url, result.error) {
        (true, Some(url), _) => {
            info!(url = %url, "Payout report exported");
            Ok(())
        }
        (_, _, error) => Err(AppError::Other(anyhow::anyhow!(
            error.unwrap_or_else(|| "Export failed".to_string())
        ))),
    }
}
