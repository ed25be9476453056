//! Graph types backed by petgraph.

use layerdrift_core::models::{DependencyKind, Module};
use layerdrift_core::types::collections::FxHashMap;
use layerdrift_core::NodeId;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

/// A directed dependency between two nodes of the same graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: DependencyKind,
}

/// Modules and dependencies of one analysis run.
///
/// Nodes are inserted in ascending module-id order and edges in ascending
/// `(source, target)` order, so a [`NodeId`] equals the petgraph node index
/// and every traversal over this type is deterministic regardless of the
/// order facts arrived in. The graph is never mutated after
/// [`GraphBuilder::build`](super::GraphBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<Module, DependencyKind>,
    index: FxHashMap<String, NodeId>,
}

#[inline]
pub(crate) fn node_index(id: NodeId) -> NodeIndex {
    NodeIndex::new(id.index())
}

#[inline]
pub(crate) fn node_id(index: NodeIndex) -> NodeId {
    NodeId::from_index(index.index())
}

impl DependencyGraph {
    /// `modules` must be sorted by id and unique; `edges` sorted, unique,
    /// and free of self-loops. Enforced by the builder.
    pub(crate) fn from_sorted(modules: Vec<Module>, edges: Vec<Edge>) -> Self {
        let mut graph = DiGraph::with_capacity(modules.len(), edges.len());
        let mut index = FxHashMap::default();
        for module in modules {
            let id = module.id.clone();
            index.insert(id, node_id(graph.add_node(module)));
        }
        for edge in edges {
            graph.add_edge(node_index(edge.source), node_index(edge.target), edge.kind);
        }
        Self { graph, index }
    }

    /// Underlying petgraph graph, for the graph algorithms.
    pub(crate) fn inner(&self) -> &DiGraph<Module, DependencyKind> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices().map(node_id)
    }

    pub fn module(&self, id: NodeId) -> &Module {
        &self.graph[node_index(id)]
    }

    /// Modules in ascending id order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> + '_ {
        self.graph.node_weights()
    }

    /// Edges in ascending `(source, target)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(|r| Edge {
            source: node_id(r.source()),
            target: node_id(r.target()),
            kind: *r.weight(),
        })
    }

    pub fn node_id(&self, module_id: &str) -> Option<NodeId> {
        self.index.get(module_id).copied()
    }

    /// Direct dependencies of a node, ascending.
    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        let mut targets: Vec<NodeId> = self.graph.neighbors(node_index(id)).map(node_id).collect();
        targets.sort_unstable();
        targets
    }

    /// Look up an edge by module ids.
    pub fn edge_between(&self, source: &str, target: &str) -> Option<Edge> {
        let (s, t) = (self.node_id(source)?, self.node_id(target)?);
        let e = self.graph.find_edge(node_index(s), node_index(t))?;
        Some(Edge {
            source: s,
            target: t,
            kind: self.graph[e],
        })
    }
}
