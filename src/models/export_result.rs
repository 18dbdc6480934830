use serde::Serialize;

/// Outcome of a single export call. `success` discriminates between `url`
/// and `error`; exactly one of them is set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportResult {
    pub success: bool,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl ExportResult {
    pub fn succeeded(url: String) -> Self {
        Self {
            success: true,
            url: Some(url),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            url: None,
            error: Some(error),
        }
    }
}
