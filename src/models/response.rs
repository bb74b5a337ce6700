//! HTTP response models
//!
//! Defines the JSON bodies returned by the upload and query endpoints.

use serde::Serialize;

use crate::models::record::{IngestionReport, RowFailure, StockRecord};

/// Summary returned after a successful ingestion call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    /// Rows seen
    pub total_records: u64,
    /// Rows persisted
    pub successful_records: u64,
    /// Rows rejected
    pub failed_records: usize,
    /// Itemized rejections, in arrival order
    pub errors: Vec<RowFailure>,
}

impl From<IngestionReport> for UploadSummary {
    fn from(report: IngestionReport) -> Self {
        Self {
            total_records: report.total_records,
            successful_records: report.successful_records,
            failed_records: report.failed_records.len(),
            errors: report.failed_records,
        }
    }
}

/// Error body for client and server errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short error description
    pub error: String,
    /// Underlying cause, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Body of `GET /stocks/api/highest_volume`.
#[derive(Debug, Serialize)]
pub struct HighestVolumeResponse {
    /// The matching record with maximum volume, null when nothing matches
    pub highest_volume: Option<StockRecord>,
}

/// Body of `GET /stocks/api/average_close`.
#[derive(Debug, Serialize)]
pub struct AverageCloseResponse {
    /// Mean close over the matching records, null when nothing matches
    pub average_close: Option<f64>,
}

/// Body of `GET /stocks/api/average_vwap`.
#[derive(Debug, Serialize)]
pub struct AverageVwapResponse {
    /// Mean VWAP over the matching records, null when nothing matches
    pub average_vwap: Option<f64>,
}
