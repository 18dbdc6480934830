mod exporter;
#[cfg(test)]
pub(crate) mod mocks;
mod provisioner;

pub use exporter::PayoutExporter;

use crate::error::{AppError, Result};
use url::Url;

const SPREADSHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d/";

/// Shareable edit link for a spreadsheet. Built from the id alone; the
/// document is not consulted.
pub fn share_url(spreadsheet_id: &str) -> Result<String> {
    let mut url = Url::parse(SPREADSHEETS_BASE_URL).map_err(|e| AppError::Other(e.into()))?;

    url.path_segments_mut()
        .map_err(|_| AppError::Other(anyhow::anyhow!("Spreadsheet base URL cannot be a base")))?
        .pop_if_empty()
        .push(spreadsheet_id)
        .push("edit");
    url.query_pairs_mut().append_pair("usp", "sharing");

    Ok(url.into())
}
