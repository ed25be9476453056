//! Graph construction errors.

use super::error_code::{self, LayerDriftErrorCode};

/// An edge fact that cannot be placed in the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphBuildError {
    #[error("dependency {source_id} -> {target_id} references unknown module {missing}")]
    DanglingEdge {
        source_id: String,
        target_id: String,
        missing: String,
    },

    #[error("unknown dependency kind: {kind}")]
    UnknownDependencyKind { kind: String },
}

impl LayerDriftErrorCode for GraphBuildError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DanglingEdge { .. } => error_code::GRAPH_DANGLING_EDGE,
            Self::UnknownDependencyKind { .. } => error_code::GRAPH_UNKNOWN_DEPENDENCY_KIND,
        }
    }
}
