//! Snapshot history: an in-memory [`SnapshotStore`](layerdrift_core::SnapshotStore)
//! and id-based comparison over any store.

pub mod compare;
pub mod store;

pub use compare::{compare_chronological, compare_snapshots};
pub use store::InMemorySnapshotStore;
