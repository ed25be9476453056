//! Snapshot invariant violations. From the pipeline they indicate a logic
//! bug; from deserialization, a malformed stored snapshot. Surfaced rather
//! than repaired.

use super::error_code::{self, LayerDriftErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("edge {from} -> {to} references a module outside the graph")]
    DanglingEndpoint { from: String, to: String },

    #[error("violation {id} ({from} -> {to}) has no matching dependency")]
    OrphanViolation { id: String, from: String, to: String },

    #[error("violation id {id} appears more than once")]
    DuplicateViolation { id: String },

    #[error("layer levels are not dense from 0: {levels:?}")]
    SparseLevels { levels: Vec<u32> },

    #[error("module {module} is assigned to unknown layer {layer}")]
    UnknownLayer { module: String, layer: String },
}

impl LayerDriftErrorCode for InvariantError {
    fn error_code(&self) -> &'static str {
        error_code::INVARIANT_VIOLATED
    }
}
