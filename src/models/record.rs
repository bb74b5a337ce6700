//! Stock record data model
//!
//! Defines the persisted record type plus the transient shapes that flow
//! through one ingestion call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One raw CSV row: column name mapped to its literal text value.
///
/// Exists only while the row is being validated/normalized; a BTreeMap
/// keeps the serialized form of failure entries deterministic.
pub type RawRow = BTreeMap<String, String>;

/// A persisted stock-price record.
///
/// Immutable once stored; every numeric field was parsed from its source
/// text before the record was accepted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StockRecord {
    /// Trading date, textual form preserved as given (DD-MM-YYYY)
    pub date: String,
    /// Exchange ticker
    pub symbol: String,
    /// Market series (e.g. EQ)
    pub series: String,
    /// Previous session close
    pub prev_close: f64,
    /// Opening price
    pub open: f64,
    /// Session high
    pub high: f64,
    /// Session low
    pub low: f64,
    /// Last traded price
    pub last: f64,
    /// Closing price
    pub close: f64,
    /// Volume-weighted average price
    pub vwap: f64,
    /// Shares traded
    pub volume: u64,
    /// Traded value
    pub turnover: f64,
    /// Trade count
    pub trades: u64,
    /// Shares actually delivered
    pub deliverable: u64,
    /// Delivered fraction of traded volume
    pub percent_deliverable: f64,
}

/// Query parameters shared by the aggregate endpoints.
///
/// All bounds are optional; an absent bound is unbounded on that side and
/// an absent symbol matches every symbol. Dates compare in the stored
/// textual form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct QueryFilter {
    /// Inclusive lower date bound (DD-MM-YYYY)
    pub start_date: Option<String>,
    /// Inclusive upper date bound (DD-MM-YYYY)
    pub end_date: Option<String>,
    /// Exact-match ticker
    pub symbol: Option<String>,
}

impl QueryFilter {
    /// Whether a record passes every present bound (AND-composed).
    pub fn matches(&self, record: &StockRecord) -> bool {
        if let Some(start) = &self.start_date {
            if record.date.as_str() < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end_date {
            if record.date.as_str() > end.as_str() {
                return false;
            }
        }
        if let Some(symbol) = &self.symbol {
            if record.symbol != *symbol {
                return false;
            }
        }
        true
    }
}

/// One rejected row together with the reason it was rejected.
#[derive(Debug, Serialize, Clone)]
pub struct RowFailure {
    /// The raw row as read from the file
    pub row: RawRow,
    /// Joined description of every violated field
    pub error: String,
}

/// Result of one ingestion call. Not persisted.
#[derive(Debug, Default)]
pub struct IngestionReport {
    /// Rows seen in the stream
    pub total_records: u64,
    /// Rows validated, normalized and persisted
    pub successful_records: u64,
    /// Rows rejected by validation, in arrival order
    pub failed_records: Vec<RowFailure>,
}
