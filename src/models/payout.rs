use crate::error::{AppError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

/// One reportable payout event.
///
/// CSV input uses the sheet's column headers (`Title`, `Author`, ...), JSON
/// input uses the lowercase field names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayoutRecord {
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Author")]
    pub author: String,
    #[serde(rename = "type", alias = "Type")]
    pub type_: String,
    #[serde(alias = "Date")]
    pub date: String,
    #[serde(alias = "Payout")]
    pub payout: Decimal,
}

impl PayoutRecord {
    /// Load records from a `.csv` or `.json` file, chosen by extension.
    pub fn load(path: &Path) -> Result<Vec<Self>> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Self::from_csv_reader(fs::File::open(path)?),
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(AppError::Input(format!(
                "Unsupported input file {:?}, expected .csv or .json",
                path
            ))),
        }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Self>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        reader
            .deserialize::<PayoutRecord>()
            .enumerate()
            .map(|(idx, record)| {
                // Row 1 is the header line
                record.map_err(|e| AppError::Input(format!("Failed to parse row {}: {}", idx + 2, e)))
            })
            .collect()
    }

    pub fn from_json_str(contents: &str) -> Result<Vec<Self>> {
        serde_json::from_str(contents)
            .map_err(|e| AppError::Input(format!("Failed to parse JSON records: {}", e)))
    }
}
