//! Run-level error. All stage errors convert into this via `From` impls.

use super::{
    error_code::LayerDriftErrorCode, ConfigurationError, GraphBuildError, InferenceError,
    InvariantError,
};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Only raised when the dangling-edge policy is `abort`.
    #[error("graph build aborted: {0}")]
    GraphBuild(#[from] GraphBuildError),

    #[error("layer inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}

impl LayerDriftErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::GraphBuild(e) => e.error_code(),
            Self::Inference(e) => e.error_code(),
            Self::Configuration(e) => e.error_code(),
            Self::Invariant(e) => e.error_code(),
        }
    }
}

/// Convenience type alias.
pub type PipelineResult<T> = Result<T, PipelineError>;
