//! In-memory store
//!
//! RwLock over a Vec: concurrent readers, exclusive bulk writers.
//! Insertion order is preserved, which keeps tie-breaking in the query
//! service deterministic.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StockStore, StoreError};
use crate::models::{QueryFilter, StockRecord};

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StockRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockStore for MemoryStore {
    async fn insert_many(&self, records: Vec<StockRecord>) -> Result<(), StoreError> {
        self.records.write().await.extend(records);
        Ok(())
    }

    async fn find(&self, filter: &QueryFilter) -> Result<Vec<StockRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}
