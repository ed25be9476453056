//! Id-based comparison over a snapshot store.

use std::sync::Arc;

use layerdrift_core::errors::ComparisonError;
use layerdrift_core::models::{Snapshot, SnapshotComparison};
use layerdrift_core::traits::SnapshotStore;

use crate::comparison::compare;

fn resolve(store: &dyn SnapshotStore, id: &str) -> Result<Arc<Snapshot>, ComparisonError> {
    store
        .get(id)?
        .ok_or_else(|| ComparisonError::NotFound { id: id.to_string() })
}

/// Compare two stored snapshots in the order given.
pub fn compare_snapshots(
    store: &dyn SnapshotStore,
    from_id: &str,
    to_id: &str,
) -> Result<SnapshotComparison, ComparisonError> {
    let from = resolve(store, from_id)?;
    let to = resolve(store, to_id)?;
    Ok(compare(&from, &to))
}

/// Compare two stored snapshots oldest to newest, whatever order the ids
/// arrive in. Equal timestamps are ordered by save order.
pub fn compare_chronological(
    store: &dyn SnapshotStore,
    a_id: &str,
    b_id: &str,
) -> Result<SnapshotComparison, ComparisonError> {
    let a = resolve(store, a_id)?;
    let b = resolve(store, b_id)?;
    let a_key = (a.timestamp(), store.sequence_of(a_id)?);
    let b_key = (b.timestamp(), store.sequence_of(b_id)?);
    if b_key < a_key {
        Ok(compare(&b, &a))
    } else {
        Ok(compare(&a, &b))
    }
}
