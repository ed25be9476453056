//! # layerdrift-core
//!
//! Foundation crate for the layerdrift architecture analysis engine.
//! Defines the data model, configuration, errors, tracing bootstrap, and the
//! snapshot storage trait. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{AnalysisConfig, InferenceConfig, LayerDriftConfig};
pub use errors::error_code::LayerDriftErrorCode;
pub use models::{
    Dependency, DependencyFact, DependencyKind, Layer, Module, ModuleFact, RepositoryInfo,
    Severity, Snapshot, SnapshotComparison, Violation, ViolationSummary, ViolationType,
};
pub use traits::SnapshotStore;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::identifiers::NodeId;
