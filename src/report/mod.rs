//! Pure computation of what a payout report looks like. Nothing here talks
//! to Google; the `sheets` adapter turns these values into API requests.

pub mod format;
pub mod layout;

pub use format::{CellRange, FormatEdit, format_plan};
pub use layout::{CellValue, ReportLayout, Row};
