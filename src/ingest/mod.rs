//! CSV ingestion pipeline
//!
//! Validates and normalizes uploaded rows and bulk-persists the accepted
//! ones. One bad row never aborts the stream; a bad header or a failed
//! bulk insert aborts the whole call.

pub mod normalize;
pub mod pipeline;
pub mod validate;

pub use pipeline::{ingest, IngestError};

/// Columns every uploaded file must declare (exact, case-sensitive).
pub const REQUIRED_COLUMNS: [&str; 15] = [
    "Date",
    "Symbol",
    "Series",
    "Prev Close",
    "Open",
    "High",
    "Low",
    "Last",
    "Close",
    "VWAP",
    "Volume",
    "Turnover",
    "Trades",
    "Deliverable Volume",
    "%Deliverable",
];

/// Fields that must hold a base-10 number.
pub const NUMERIC_FIELDS: [&str; 12] = [
    "Prev Close",
    "Open",
    "High",
    "Low",
    "Last",
    "Close",
    "VWAP",
    "Volume",
    "Turnover",
    "Trades",
    "Deliverable Volume",
    "%Deliverable",
];

/// Column holding the DD-MM-YYYY trading date.
pub const DATE_COLUMN: &str = "Date";
