//! Layer inference errors. Fatal: the run is aborted.

use super::error_code::{self, LayerDriftErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("condensation graph is not acyclic: cluster {cluster} of {total} lies on a cycle")]
    CyclicCondensation { cluster: usize, total: usize },

    #[error("module {module} was not assigned to any cluster")]
    UnassignedModule { module: String },
}

impl LayerDriftErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        error_code::INFERENCE_FAILED
    }
}
