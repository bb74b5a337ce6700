//! Row normalization
//!
//! Turns a validated raw row into a typed [`StockRecord`]. Only rows that
//! passed [`validate`](super::validate::validate) may be normalized; the
//! validator is the single source of truth for acceptability, so a parse
//! failure here is a contract violation and panics rather than surfacing
//! as a recoverable error.

use crate::models::{RawRow, StockRecord};

fn text(row: &RawRow, field: &str) -> String {
    row.get(field).cloned().unwrap_or_default()
}

fn float(row: &RawRow, field: &str) -> f64 {
    row.get(field)
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(|| panic!("unvalidated row reached normalization: bad {field}"))
}

/// Counts may arrive in float or scientific form (validation only
/// guarantees "numeric"), so fall back to truncating f64 parse.
fn count(row: &RawRow, field: &str) -> u64 {
    let value = row.get(field).map(String::as_str).unwrap_or("");
    value.parse::<u64>().unwrap_or_else(|_| {
        let parsed: f64 = value
            .parse()
            .unwrap_or_else(|_| panic!("unvalidated row reached normalization: bad {field}"));
        parsed as u64
    })
}

/// Produce the typed record for one validated row. Date, symbol and
/// series are copied verbatim as text.
pub fn normalize(row: &RawRow) -> StockRecord {
    StockRecord {
        date: text(row, "Date"),
        symbol: text(row, "Symbol"),
        series: text(row, "Series"),
        prev_close: float(row, "Prev Close"),
        open: float(row, "Open"),
        high: float(row, "High"),
        low: float(row, "Low"),
        last: float(row, "Last"),
        close: float(row, "Close"),
        vwap: float(row, "VWAP"),
        volume: count(row, "Volume"),
        turnover: float(row, "Turnover"),
        trades: count(row, "Trades"),
        deliverable: count(row, "Deliverable Volume"),
        percent_deliverable: float(row, "%Deliverable"),
    }
}
