//! Immutable records of completed analysis runs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::InvariantError;
use crate::types::collections::FxHashSet;

use super::dependency::Dependency;
use super::layer::Layer;
use super::module::Module;
use super::violation::{Severity, Violation, ViolationSummary, ViolationType};

/// Repository a run was performed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl RepositoryInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            branch: default_branch(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }
}

/// A node in the published graph: the module plus the highest severity of
/// any reported violation touching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(flatten)]
    pub module: Module,
    pub severity: Option<Severity>,
}

/// Published graph: nodes and annotated edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Dependency>,
}

/// Whole-graph statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub density: f64,
    pub is_dag: bool,
    pub weak_components: usize,
    /// Strongly connected components with more than one module.
    pub cyclic_clusters: usize,
}

/// Counts describing how the run degraded and what was filtered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub dropped_edges: usize,
    pub self_loops: usize,
    pub duplicate_edges: usize,
    pub duplicate_modules: usize,
    pub ignored_overrides: usize,
    /// Violations found before the severity threshold was applied.
    pub detected_violations: usize,
    /// Violations removed by the severity threshold.
    pub filtered_violations: usize,
    pub violations_by_type: BTreeMap<ViolationType, usize>,
    pub graph_stats: GraphStats,
}

/// Everything needed to assemble a snapshot. Consumed by [`Snapshot::from_parts`].
///
/// Also the deserialization shape of a snapshot: a stored `summary` is
/// ignored and recomputed from the violations.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotParts {
    pub id: String,
    pub repository: Option<RepositoryInfo>,
    pub timestamp: DateTime<Utc>,
    pub graph: GraphView,
    pub layers: Vec<Layer>,
    pub violations: Vec<Violation>,
    pub metadata: SnapshotMetadata,
}

/// Immutable bundle of one completed analysis run.
///
/// Fields are private: a snapshot can only be built through
/// [`Snapshot::from_parts`], which checks structural invariants and derives
/// the summary from the violation list. Deserialization goes through the
/// same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotParts")]
pub struct Snapshot {
    id: String,
    repository: Option<RepositoryInfo>,
    timestamp: DateTime<Utc>,
    graph: GraphView,
    layers: Vec<Layer>,
    violations: Vec<Violation>,
    summary: ViolationSummary,
    metadata: SnapshotMetadata,
}

impl Snapshot {
    /// Validate and freeze a completed run.
    pub fn from_parts(parts: SnapshotParts) -> Result<Self, InvariantError> {
        validate(&parts)?;
        let summary = ViolationSummary::from_violations(&parts.violations);
        Ok(Self {
            id: parts.id,
            repository: parts.repository,
            timestamp: parts.timestamp,
            graph: parts.graph,
            layers: parts.layers,
            violations: parts.violations,
            summary,
            metadata: parts.metadata,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn repository(&self) -> Option<&RepositoryInfo> {
        self.repository.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn graph(&self) -> &GraphView {
        &self.graph
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn summary(&self) -> &ViolationSummary {
        &self.summary
    }

    pub fn metadata(&self) -> &SnapshotMetadata {
        &self.metadata
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Layer name assigned to a module, if the module exists.
    pub fn layer_of(&self, module_id: &str) -> Option<&str> {
        self.graph
            .nodes
            .iter()
            .find(|n| n.module.id == module_id)
            .and_then(|n| n.module.layer.as_deref())
    }

    pub fn violations_of_type(&self, violation_type: ViolationType) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |v| v.violation_type == violation_type)
    }

    /// Lightweight listing entry.
    pub fn list_item(&self) -> SnapshotListItem {
        SnapshotListItem {
            id: self.id.clone(),
            repository: self.repository.clone(),
            timestamp: self.timestamp,
            summary: self.summary,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl TryFrom<SnapshotParts> for Snapshot {
    type Error = InvariantError;

    fn try_from(parts: SnapshotParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts)
    }
}

/// Snapshot entry for history listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotListItem {
    pub id: String,
    pub repository: Option<RepositoryInfo>,
    pub timestamp: DateTime<Utc>,
    pub summary: ViolationSummary,
}

fn validate(parts: &SnapshotParts) -> Result<(), InvariantError> {
    let node_ids: FxHashSet<&str> = parts.graph.nodes.iter().map(|n| n.module.id.as_str()).collect();

    let mut edge_pairs: FxHashSet<(&str, &str)> = FxHashSet::default();
    for edge in &parts.graph.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !node_ids.contains(endpoint.as_str()) {
                return Err(InvariantError::DanglingEndpoint {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                });
            }
        }
        edge_pairs.insert((edge.source.as_str(), edge.target.as_str()));
    }

    let mut violation_ids: FxHashSet<&str> = FxHashSet::default();
    for violation in &parts.violations {
        if !edge_pairs.contains(&(violation.source_module.as_str(), violation.target_module.as_str())) {
            return Err(InvariantError::OrphanViolation {
                id: violation.id.clone(),
                from: violation.source_module.clone(),
                to: violation.target_module.clone(),
            });
        }
        if !violation_ids.insert(violation.id.as_str()) {
            return Err(InvariantError::DuplicateViolation { id: violation.id.clone() });
        }
    }

    let levels: BTreeSet<u32> = parts.layers.iter().map(|l| l.level).collect();
    if let Some(&max) = levels.iter().next_back() {
        if levels.len() != max as usize + 1 {
            return Err(InvariantError::SparseLevels {
                levels: levels.into_iter().collect(),
            });
        }
    }

    let layer_names: FxHashSet<&str> = parts.layers.iter().map(|l| l.name.as_str()).collect();
    for node in &parts.graph.nodes {
        if let Some(layer) = node.module.layer.as_deref() {
            if !layer_names.contains(layer) {
                return Err(InvariantError::UnknownLayer {
                    module: node.module.id.clone(),
                    layer: layer.to_string(),
                });
            }
        }
    }

    Ok(())
}
