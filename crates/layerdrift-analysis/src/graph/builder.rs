//! GraphBuilder: turns raw module and dependency facts into a [`DependencyGraph`].

use std::collections::BTreeMap;

use layerdrift_core::config::DanglingEdgePolicy;
use layerdrift_core::errors::GraphBuildError;
use layerdrift_core::models::{DependencyFact, DependencyKind, Module, ModuleFact};
use layerdrift_core::types::collections::FxHashMap;
use layerdrift_core::NodeId;

use super::types::{DependencyGraph, Edge};

/// What the builder discarded or merged on the way to a clean graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Edges dropped because an endpoint was not a known module.
    pub dropped: Vec<GraphBuildError>,
    pub self_loops: usize,
    /// Repeated `(source, target)` pairs merged into the first occurrence.
    pub duplicate_edges: usize,
    /// Repeated module ids merged into the first occurrence.
    pub duplicate_modules: usize,
}

/// A built graph together with its build report.
#[derive(Debug, Clone)]
pub struct GraphBuild {
    pub graph: DependencyGraph,
    pub report: BuildReport,
}

/// Accumulates facts in arrival order. Nothing is validated until [`build`](Self::build).
#[derive(Debug, Default)]
pub struct GraphBuilder {
    modules: Vec<Module>,
    positions: FxHashMap<String, usize>,
    dependencies: Vec<DependencyFact>,
    duplicate_modules: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module. A repeated id keeps the first path and merges tags.
    pub fn add_module(&mut self, fact: &ModuleFact) {
        if let Some(&pos) = self.positions.get(&fact.id) {
            self.modules[pos].merge_tags(&fact.tags);
            self.duplicate_modules += 1;
            return;
        }
        self.positions.insert(fact.id.clone(), self.modules.len());
        self.modules.push(Module::from_fact(fact));
    }

    pub fn add_modules<'a>(&mut self, facts: impl IntoIterator<Item = &'a ModuleFact>) {
        for fact in facts {
            self.add_module(fact);
        }
    }

    pub fn add_dependency(&mut self, fact: DependencyFact) {
        self.dependencies.push(fact);
    }

    pub fn add_dependencies(&mut self, facts: impl IntoIterator<Item = DependencyFact>) {
        self.dependencies.extend(facts);
    }

    /// Build the graph.
    ///
    /// Self-loops are discarded and duplicate edges collapse into the first
    /// occurrence (whose kind is kept). An edge naming an unknown module is
    /// handled according to `policy`: dropped and reported, or returned as
    /// the error that aborts the build.
    pub fn build(self, policy: DanglingEdgePolicy) -> Result<GraphBuild, GraphBuildError> {
        let mut report = BuildReport {
            duplicate_modules: self.duplicate_modules,
            ..BuildReport::default()
        };

        let mut modules = self.modules;
        modules.sort_by(|a, b| a.id.cmp(&b.id));
        let index: FxHashMap<&str, NodeId> = modules
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.as_str(), NodeId::from_index(i)))
            .collect();

        let mut edges: BTreeMap<(NodeId, NodeId), DependencyKind> = BTreeMap::new();
        for fact in &self.dependencies {
            let source = index.get(fact.source_id.as_str()).copied();
            let target = index.get(fact.target_id.as_str()).copied();
            let (source, target) = match (source, target) {
                (Some(s), Some(t)) => (s, t),
                (s, _) => {
                    let missing = if s.is_none() { &fact.source_id } else { &fact.target_id };
                    let err = GraphBuildError::DanglingEdge {
                        source_id: fact.source_id.clone(),
                        target_id: fact.target_id.clone(),
                        missing: missing.clone(),
                    };
                    if policy == DanglingEdgePolicy::Abort {
                        return Err(err);
                    }
                    tracing::warn!(
                        source_id = %fact.source_id,
                        target_id = %fact.target_id,
                        missing = %missing,
                        "dropping dependency on unknown module"
                    );
                    report.dropped.push(err);
                    continue;
                }
            };
            if source == target {
                report.self_loops += 1;
                continue;
            }
            if edges.contains_key(&(source, target)) {
                report.duplicate_edges += 1;
            } else {
                edges.insert((source, target), fact.kind);
            }
        }

        let edges = edges
            .into_iter()
            .map(|((source, target), kind)| Edge { source, target, kind })
            .collect();

        tracing::debug!(
            dropped = report.dropped.len(),
            self_loops = report.self_loops,
            duplicate_edges = report.duplicate_edges,
            "dependency graph built"
        );

        Ok(GraphBuild {
            graph: DependencyGraph::from_sorted(modules, edges),
            report,
        })
    }
}
