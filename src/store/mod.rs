//! Document-store interface
//!
//! The pipeline and query service only need a generic insert-many and
//! filtered-find capability, so the store is a trait; the shipped
//! implementation is in-memory and a real document-store driver can be
//! dropped in behind the same trait.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{QueryFilter, StockRecord};

/// Errors surfaced by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage capability for stock records.
///
/// `insert_many` is the bulk-persist used once per ingestion call and is
/// all-or-nothing from the caller's perspective. Records are immutable
/// once stored; there is no update or delete operation.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Persist every record, atomically as far as reporting goes: an
    /// `Err` means none of them count as stored.
    async fn insert_many(&self, records: Vec<StockRecord>) -> Result<(), StoreError>;

    /// Fetch every record matching the filter, in insertion order.
    async fn find(&self, filter: &QueryFilter) -> Result<Vec<StockRecord>, StoreError>;
}
