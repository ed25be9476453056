//! `SnapshotStore` trait: persistence seam for completed analyses.
//!
//! The engine itself never persists anything; hosts plug a store in behind
//! this trait. Implementations must treat snapshots as append-only.

use std::sync::Arc;

use crate::errors::StoreError;
use crate::models::{Snapshot, SnapshotListItem};

pub trait SnapshotStore: Send + Sync {
    /// Persist a snapshot. Fails if a snapshot with the same id exists.
    fn save(&self, snapshot: Snapshot) -> Result<String, StoreError>;

    fn get(&self, id: &str) -> Result<Option<Arc<Snapshot>>, StoreError>;

    /// Newest first, optionally restricted to one repository name.
    fn list(&self, repository: Option<&str>, limit: usize) -> Result<Vec<SnapshotListItem>, StoreError>;

    /// Most recent snapshot for a repository branch.
    fn latest(&self, repository: &str, branch: &str) -> Result<Option<Arc<Snapshot>>, StoreError>;

    /// Position of a snapshot in save order, used to order equal timestamps.
    fn sequence_of(&self, id: &str) -> Result<Option<u64>, StoreError>;
}
