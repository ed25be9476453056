//! Stable error codes for callers that map errors onto an API surface.

/// Implemented by every error enum in the workspace.
pub trait LayerDriftErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const GRAPH_DANGLING_EDGE: &str = "GRAPH_DANGLING_EDGE";
pub const GRAPH_UNKNOWN_DEPENDENCY_KIND: &str = "GRAPH_UNKNOWN_DEPENDENCY_KIND";
pub const INFERENCE_FAILED: &str = "INFERENCE_FAILED";
pub const CONFIG_UNKNOWN_LAYER: &str = "CONFIG_UNKNOWN_LAYER";
pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
pub const CONFIG_PARSE: &str = "CONFIG_PARSE";
pub const CONFIG_IO: &str = "CONFIG_IO";
pub const SNAPSHOT_NOT_FOUND: &str = "SNAPSHOT_NOT_FOUND";
pub const SNAPSHOT_DUPLICATE: &str = "SNAPSHOT_DUPLICATE";
pub const STORE_POISONED: &str = "STORE_POISONED";
pub const INVARIANT_VIOLATED: &str = "INVARIANT_VIOLATED";
