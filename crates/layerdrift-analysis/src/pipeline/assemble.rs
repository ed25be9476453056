//! Snapshot assembly: threshold, annotate, validate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use layerdrift_core::config::AnalysisConfig;
use layerdrift_core::errors::InvariantError;
use layerdrift_core::models::{
    Dependency, GraphNode, GraphView, RepositoryInfo, Severity, Snapshot, SnapshotMetadata,
    SnapshotParts, ViolationType,
};
use layerdrift_core::types::collections::FxHashMap;

use crate::drift::{apply_threshold, DetectionOutcome};
use crate::graph::{compute_stats, BuildReport, DependencyGraph};
use crate::inference::LayerInference;
use crate::rules::RulesEngine;

pub(super) struct Assembly<'a> {
    pub repository: Option<RepositoryInfo>,
    pub timestamp: DateTime<Utc>,
    pub graph: &'a DependencyGraph,
    pub report: &'a BuildReport,
    pub inference: &'a LayerInference,
    pub rules: &'a RulesEngine,
    pub config: &'a AnalysisConfig,
    pub outcome: DetectionOutcome,
}

/// Build the published snapshot. Only violations at or above the threshold
/// are reported, and the graph view annotates exactly those.
pub(super) fn assemble(a: Assembly<'_>) -> Result<Snapshot, InvariantError> {
    let detected = a.outcome.violations.len();
    let reported = apply_threshold(a.outcome.violations, a.config.severity_threshold);

    let mut edge_types: FxHashMap<(&str, &str), ViolationType> = FxHashMap::default();
    let mut node_severity: FxHashMap<&str, Severity> = FxHashMap::default();
    let mut violations_by_type = std::collections::BTreeMap::new();
    for v in &reported.kept {
        edge_types.insert((v.source_module.as_str(), v.target_module.as_str()), v.violation_type);
        for id in [&v.source_module, &v.target_module] {
            let slot = node_severity.entry(id.as_str()).or_insert(v.severity);
            *slot = (*slot).max(v.severity);
        }
        *violations_by_type.entry(v.violation_type).or_insert(0) += 1;
    }

    let nodes = a
        .graph
        .node_ids()
        .map(|n| {
            let module = a.graph.module(n);
            GraphNode {
                module: module.with_layer(a.inference.layer_of(n).name.clone()),
                severity: node_severity.get(module.id.as_str()).copied(),
            }
        })
        .collect();
    let edges = a
        .graph
        .edges()
        .map(|e| {
            let source = &a.graph.module(e.source).id;
            let target = &a.graph.module(e.target).id;
            let violation_type = edge_types.get(&(source.as_str(), target.as_str())).copied();
            Dependency {
                source: source.clone(),
                target: target.clone(),
                kind: e.kind,
                is_violation: violation_type.is_some(),
                violation_type,
            }
        })
        .collect();

    let mut layers = a.inference.layers().to_vec();
    a.rules.apply_allowed_dependencies(&mut layers);
    for layer in layers.iter_mut() {
        layer.external_facing = a.config.is_external_facing(&layer.name);
    }

    let metadata = SnapshotMetadata {
        dropped_edges: a.report.dropped.len(),
        self_loops: a.report.self_loops,
        duplicate_edges: a.report.duplicate_edges,
        duplicate_modules: a.report.duplicate_modules,
        ignored_overrides: a.rules.ignored_overrides().len(),
        detected_violations: detected,
        filtered_violations: reported.filtered,
        violations_by_type,
        graph_stats: compute_stats(a.graph, a.inference.condensation()),
    };

    Snapshot::from_parts(SnapshotParts {
        id: Uuid::new_v4().to_string(),
        repository: a.repository,
        timestamp: a.timestamp,
        graph: GraphView { nodes, edges },
        layers,
        violations: reported.kept,
        metadata,
    })
}
