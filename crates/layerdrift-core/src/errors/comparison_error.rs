//! Snapshot comparison errors.

use super::error_code::{self, LayerDriftErrorCode};
use super::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    #[error("snapshot not found: {id}")]
    NotFound { id: String },

    #[error("snapshot store error: {0}")]
    Store(#[from] StoreError),
}

impl LayerDriftErrorCode for ComparisonError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::SNAPSHOT_NOT_FOUND,
            Self::Store(e) => e.error_code(),
        }
    }
}
