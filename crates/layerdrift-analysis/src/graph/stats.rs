//! Whole-graph statistics.

use layerdrift_core::models::GraphStats;

use super::condensation::Condensation;
use super::types::DependencyGraph;

/// Compute graph statistics. `condensation` must belong to `graph`.
pub fn compute_stats(graph: &DependencyGraph, condensation: &Condensation) -> GraphStats {
    let n = graph.node_count();
    let e = graph.edge_count();
    let density = if n > 1 {
        e as f64 / (n as f64 * (n as f64 - 1.0))
    } else {
        0.0
    };
    let cyclic_clusters = condensation.partition().cyclic().count();
    GraphStats {
        total_nodes: n,
        total_edges: e,
        density,
        is_dag: cyclic_clusters == 0,
        // petgraph unions edge endpoints, so direction is ignored.
        weak_components: petgraph::algo::connected_components(graph.inner()),
        cyclic_clusters,
    }
}
