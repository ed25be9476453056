//! Shared traits used across layerdrift crates.

pub mod snapshot_store;

pub use snapshot_store::SnapshotStore;
