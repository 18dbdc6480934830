pub mod export_result;
pub mod payout;

pub use export_result::ExportResult;
pub use payout::PayoutRecord;
