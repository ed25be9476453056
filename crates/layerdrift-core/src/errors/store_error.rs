//! Snapshot store errors.

use super::error_code::{self, LayerDriftErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Snapshots are immutable; an id can only be saved once.
    #[error("snapshot {id} already exists")]
    DuplicateSnapshot { id: String },

    #[error("snapshot store lock poisoned")]
    Poisoned,
}

impl LayerDriftErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateSnapshot { .. } => error_code::SNAPSHOT_DUPLICATE,
            Self::Poisoned => error_code::STORE_POISONED,
        }
    }
}
