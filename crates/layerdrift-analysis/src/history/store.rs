//! `InMemorySnapshotStore`: thread-safe, append-only snapshot history.

use std::sync::{Arc, RwLock};

use layerdrift_core::errors::StoreError;
use layerdrift_core::models::{Snapshot, SnapshotListItem};
use layerdrift_core::traits::SnapshotStore;
use layerdrift_core::types::collections::FxHashMap;

#[derive(Debug, Default)]
struct Inner {
    /// Save order.
    snapshots: Vec<Arc<Snapshot>>,
    by_id: FxHashMap<String, usize>,
}

/// Snapshots are kept in save order and never replaced.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    inner: RwLock<Inner>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().map_err(|_| StoreError::Poisoned)?.snapshots.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&self, snapshot: Snapshot) -> Result<String, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if inner.by_id.contains_key(snapshot.id()) {
            tracing::warn!(id = %snapshot.id(), "refusing to overwrite existing snapshot");
            return Err(StoreError::DuplicateSnapshot {
                id: snapshot.id().to_string(),
            });
        }
        let id = snapshot.id().to_string();
        let position = inner.snapshots.len();
        inner.by_id.insert(id.clone(), position);
        inner.snapshots.push(Arc::new(snapshot));
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Option<Arc<Snapshot>>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.by_id.get(id).map(|&i| Arc::clone(&inner.snapshots[i])))
    }

    fn list(&self, repository: Option<&str>, limit: usize) -> Result<Vec<SnapshotListItem>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut matching: Vec<(usize, &Arc<Snapshot>)> = inner
            .snapshots
            .iter()
            .enumerate()
            .filter(|(_, s)| match repository {
                Some(name) => s.repository().is_some_and(|r| r.name == name),
                None => true,
            })
            .collect();
        // Newest first; equal timestamps fall back to save order.
        matching.sort_by(|(ia, a), (ib, b)| b.timestamp().cmp(&a.timestamp()).then(ib.cmp(ia)));
        Ok(matching
            .into_iter()
            .take(limit)
            .map(|(_, s)| s.list_item())
            .collect())
    }

    fn latest(&self, repository: &str, branch: &str) -> Result<Option<Arc<Snapshot>>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .snapshots
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                s.repository()
                    .is_some_and(|r| r.name == repository && r.branch == branch)
            })
            .max_by(|(ia, a), (ib, b)| a.timestamp().cmp(&b.timestamp()).then(ia.cmp(ib)))
            .map(|(_, s)| Arc::clone(s)))
    }

    fn sequence_of(&self, id: &str) -> Result<Option<u64>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.by_id.get(id).map(|&i| i as u64))
    }
}
