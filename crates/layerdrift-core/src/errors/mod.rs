//! Error taxonomy for the analysis pipeline.
//!
//! Structural input errors (`GraphBuildError`, `ConfigurationError`) are
//! recovered locally by the stage that raises them. `InferenceError` and
//! `InvariantError` abort the run.

pub mod error_code;

mod comparison_error;
mod config_error;
mod graph_error;
mod inference_error;
mod invariant_error;
mod pipeline_error;
mod store_error;

pub use comparison_error::ComparisonError;
pub use config_error::ConfigurationError;
pub use error_code::LayerDriftErrorCode;
pub use graph_error::GraphBuildError;
pub use inference_error::InferenceError;
pub use invariant_error::InvariantError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use store_error::StoreError;
