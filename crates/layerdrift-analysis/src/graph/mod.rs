//! Dependency graph: a petgraph `DiGraph` of modules whose node indices are
//! the [`NodeId`](layerdrift_core::NodeId)s.

pub mod builder;
pub mod condensation;
pub mod scc;
pub mod stats;
pub mod types;

pub use builder::{BuildReport, GraphBuild, GraphBuilder};
pub use condensation::Condensation;
pub use scc::{strongly_connected_components, SccPartition};
pub use stats::compute_stats;
pub use types::{DependencyGraph, Edge};
