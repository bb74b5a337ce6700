//! Aggregate query service
//!
//! Single-pass reductions over the filtered record set. Every operation
//! re-fetches from the store; there is no indexing or caching here.

use crate::models::{QueryFilter, StockRecord};
use crate::store::{StockStore, StoreError};

/// The matching record with maximum volume, or `None` when nothing
/// matches. Ties go to the earliest record in store order, which is
/// deterministic for deterministic input order.
pub async fn highest_volume(
    store: &dyn StockStore,
    filter: &QueryFilter,
) -> Result<Option<StockRecord>, StoreError> {
    let records = store.find(filter).await?;
    Ok(records.into_iter().fold(None, |best, record| match best {
        Some(current) if current.volume >= record.volume => Some(current),
        _ => Some(record),
    }))
}

/// Mean close price over the matching records; `None` when nothing
/// matches, never NaN.
pub async fn average_close(
    store: &dyn StockStore,
    filter: &QueryFilter,
) -> Result<Option<f64>, StoreError> {
    let records = store.find(filter).await?;
    Ok(mean(records.iter().map(|record| record.close)))
}

/// Mean VWAP over the matching records, same empty-set policy as
/// [`average_close`].
pub async fn average_vwap(
    store: &dyn StockStore,
    filter: &QueryFilter,
) -> Result<Option<f64>, StoreError> {
    let records = store.find(filter).await?;
    Ok(mean(records.iter().map(|record| record.vwap)))
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (count, sum) = values.fold((0u64, 0.0), |(count, sum), value| (count + 1, sum + value));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
