//! Strongly connected components via petgraph's Tarjan.
//!
//! petgraph returns components in reverse topological order with members in
//! visit order; both are canonicalised here so the partition only depends on
//! the graph.

use layerdrift_core::NodeId;
use petgraph::graph::DiGraph;

use super::types::{node_id, DependencyGraph};

/// Partition of a graph's nodes into strongly connected components.
///
/// Each component's members are ascending and components are ordered by
/// their smallest member, so the partition does not depend on traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccPartition {
    components: Vec<Vec<NodeId>>,
    component_of: Vec<usize>,
}

impl SccPartition {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[Vec<NodeId>] {
        &self.components
    }

    pub fn members(&self, component: usize) -> &[NodeId] {
        &self.components[component]
    }

    pub fn component_of(&self, node: NodeId) -> usize {
        self.component_of[node.index()]
    }

    /// Components with more than one member, i.e. actual cycles.
    pub fn cyclic(&self) -> impl Iterator<Item = (usize, &[NodeId])> {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, members)| members.len() > 1)
            .map(|(i, members)| (i, members.as_slice()))
    }
}

/// Compute the SCC partition of a dependency graph.
pub fn strongly_connected_components(graph: &DependencyGraph) -> SccPartition {
    let components = canonical_sccs(graph.inner());
    let mut component_of = vec![0; graph.node_count()];
    for (c, members) in components.iter().enumerate() {
        for &m in members {
            component_of[m] = c;
        }
    }
    SccPartition {
        components: components
            .into_iter()
            .map(|members| members.into_iter().map(NodeId::from_index).collect())
            .collect(),
        component_of,
    }
}

/// `tarjan_scc` with sorted members, components ordered by smallest member.
pub(crate) fn canonical_sccs<N, E>(graph: &DiGraph<N, E>) -> Vec<Vec<usize>> {
    let mut components: Vec<Vec<usize>> = petgraph::algo::tarjan_scc(graph)
        .into_iter()
        .map(|scc| {
            let mut members: Vec<usize> = scc.into_iter().map(|n| node_id(n).index()).collect();
            members.sort_unstable();
            members
        })
        .collect();
    components.sort_unstable_by_key(|c| c[0]);
    components
}
