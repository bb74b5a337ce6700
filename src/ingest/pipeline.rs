//! Ingestion pipeline
//!
//! Pull-based: the CSV reader yields rows one at a time and an ordinary
//! loop consumes them, so the whole-file header check runs before any row
//! and the response is only built after the stream is exhausted. Memory
//! stays constant with respect to raw input size; only the accepted-record
//! buffer grows with valid-row count.

use std::io::Read;

use csv::ReaderBuilder;
use thiserror::Error;

use super::{normalize, validate, REQUIRED_COLUMNS};
use crate::models::{IngestionReport, RawRow, RowFailure};
use crate::store::{StockStore, StoreError};

/// Whole-call ingestion failures. Row-level validation failures are not
/// errors; they land in the report instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Required columns absent from the declared header. Nothing was read
    /// past the header line.
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The header line itself could not be read as CSV.
    #[error("unreadable CSV header: {0}")]
    Header(#[source] csv::Error),

    /// Bulk persist failed; no records were stored.
    #[error("Database error: {0}")]
    Storage(#[from] StoreError),
}

/// Stream `source` through validation and normalization, bulk-persist the
/// accepted records, and report per-row outcomes.
///
/// Each call owns its own accumulator; rows are processed in strict
/// arrival order. Persistence happens exactly once, after the stream
/// ends, so an interrupted source leaves the store untouched.
pub async fn ingest<R: Read>(
    source: R,
    store: &dyn StockStore,
) -> Result<IngestionReport, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .map_err(IngestError::Header)?
        .iter()
        .map(str::to_string)
        .collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    let mut report = IngestionReport::default();
    let mut accepted = Vec::new();

    for entry in reader.records() {
        report.total_records += 1;
        let record = match entry {
            Ok(record) => record,
            Err(err) => {
                // Reader-level problem on one line (bad UTF-8 etc.) is a
                // row failure, not a whole-call abort.
                report.failed_records.push(RowFailure {
                    row: RawRow::new(),
                    error: err.to_string(),
                });
                continue;
            }
        };

        let row: RawRow = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();

        match validate::validate(&row) {
            Ok(()) => {
                accepted.push(normalize::normalize(&row));
                report.successful_records += 1;
            }
            Err(reasons) => report.failed_records.push(RowFailure {
                row,
                error: reasons.join("; "),
            }),
        }
    }

    store.insert_many(accepted).await?;

    log::info!(
        "ingested {} of {} rows ({} rejected)",
        report.successful_records,
        report.total_records,
        report.failed_records.len()
    );
    Ok(report)
}
