//! Condensation: the DAG obtained by collapsing each SCC into one cluster.

use layerdrift_core::errors::InferenceError;
use layerdrift_core::NodeId;
use petgraph::graph::{DiGraph, NodeIndex};

use super::scc::{strongly_connected_components, SccPartition};
use super::types::DependencyGraph;

/// Clusters (SCCs) of a dependency graph and the edges between them.
///
/// Cluster ids follow the partition order, so cluster `0` holds the module
/// with the smallest id. Cluster `c` is node `c` of the DAG.
#[derive(Debug, Clone)]
pub struct Condensation {
    partition: SccPartition,
    dag: DiGraph<(), ()>,
}

impl Condensation {
    pub fn new(graph: &DependencyGraph) -> Self {
        let partition = strongly_connected_components(graph);
        let mut links: Vec<(usize, usize)> = graph
            .edges()
            .map(|e| (partition.component_of(e.source), partition.component_of(e.target)))
            .filter(|(cs, ct)| cs != ct)
            .collect();
        links.sort_unstable();
        links.dedup();
        Self {
            dag: dag(partition.len(), links),
            partition,
        }
    }

    pub fn cluster_count(&self) -> usize {
        self.partition.len()
    }

    pub fn partition(&self) -> &SccPartition {
        &self.partition
    }

    pub fn cluster_of(&self, node: NodeId) -> usize {
        self.partition.component_of(node)
    }

    pub fn members(&self, cluster: usize) -> &[NodeId] {
        self.partition.members(cluster)
    }

    /// Clusters this cluster depends on.
    pub fn successors(&self, cluster: usize) -> impl Iterator<Item = usize> + '_ {
        self.dag.neighbors(NodeIndex::new(cluster)).map(|n| n.index())
    }

    /// Clusters in dependency order: dependents before their dependencies.
    ///
    /// A condensation is acyclic by construction; an error here means the
    /// partition itself is wrong.
    pub fn topological_order(&self) -> Result<Vec<usize>, InferenceError> {
        topological_order(&self.dag)
    }

    /// Height of every cluster: 0 when it depends on nothing, otherwise one
    /// more than the highest cluster it depends on.
    pub fn heights(&self) -> Result<Vec<u32>, InferenceError> {
        heights(&self.dag)
    }
}

/// DAG over `node_count` nodes with the given `(from, to)` links.
pub(crate) fn dag(node_count: usize, links: impl IntoIterator<Item = (usize, usize)>) -> DiGraph<(), ()> {
    let mut dag = DiGraph::with_capacity(node_count, 0);
    for _ in 0..node_count {
        dag.add_node(());
    }
    for (from, to) in links {
        dag.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
    }
    dag
}

pub(crate) fn topological_order(dag: &DiGraph<(), ()>) -> Result<Vec<usize>, InferenceError> {
    petgraph::algo::toposort(dag, None)
        .map(|order| order.into_iter().map(|n| n.index()).collect())
        .map_err(|cycle| InferenceError::CyclicCondensation {
            cluster: cycle.node_id().index(),
            total: dag.node_count(),
        })
}

/// Longest-path height of every node of a DAG, counted towards its sinks.
pub(crate) fn heights(dag: &DiGraph<(), ()>) -> Result<Vec<u32>, InferenceError> {
    let order = topological_order(dag)?;
    let mut heights = vec![0u32; dag.node_count()];
    for &c in order.iter().rev() {
        heights[c] = dag
            .neighbors(NodeIndex::new(c))
            .map(|s| heights[s.index()] + 1)
            .max()
            .unwrap_or(0);
    }
    Ok(heights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use layerdrift_core::config::DanglingEdgePolicy;
    use layerdrift_core::models::{DependencyFact, ModuleFact};

    fn graph(ids: &[&str], deps: &[(&str, &str)]) -> DependencyGraph {
        let mut b = GraphBuilder::new();
        for id in ids {
            b.add_module(&ModuleFact::new(*id, format!("{id}.py")));
        }
        for (s, t) in deps {
            b.add_dependency(DependencyFact::new(*s, *t));
        }
        b.build(DanglingEdgePolicy::Drop).unwrap().graph
    }

    #[test]
    fn chain_heights() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let cond = Condensation::new(&g);
        assert_eq!(cond.heights().unwrap(), vec![2, 1, 0]);
        assert_eq!(cond.topological_order().unwrap(), vec![0, 1, 2]);
        assert_eq!(cond.successors(0).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn cycle_collapses_into_one_cluster() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("b", "c")]);
        let cond = Condensation::new(&g);
        assert_eq!(cond.cluster_count(), 2);
        assert_eq!(cond.cluster_of(NodeId(0)), cond.cluster_of(NodeId(1)));
        assert_eq!(cond.heights().unwrap(), vec![1, 0]);
    }

    #[test]
    fn height_takes_longest_path() {
        // a -> c directly and a -> b -> c
        let g = graph(&["a", "b", "c"], &[("a", "c"), ("a", "b"), ("b", "c")]);
        assert_eq!(Condensation::new(&g).heights().unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn cyclic_dag_is_reported() {
        let g = dag(2, [(0, 1), (1, 0)]);
        let err = heights(&g).unwrap_err();
        assert!(matches!(err, InferenceError::CyclicCondensation { total: 2, .. }));
    }
}
