//! Data model shared by every pipeline stage.

pub mod comparison;
pub mod dependency;
pub mod layer;
pub mod module;
pub mod snapshot;
pub mod violation;

pub use comparison::{SnapshotComparison, SummaryChange};
pub use dependency::{Dependency, DependencyFact, DependencyKind};
pub use layer::Layer;
pub use module::{Module, ModuleFact, TAG_GATEWAY, TAG_LEGACY};
pub use snapshot::{
    GraphNode, GraphStats, GraphView, RepositoryInfo, Snapshot, SnapshotListItem,
    SnapshotMetadata, SnapshotParts,
};
pub use violation::{Severity, Violation, ViolationKey, ViolationSummary, ViolationType};
