//! Ordering of provisional layer groups by majority dependency direction.
//!
//! Clusters that share a naming token merge into one group, which can make
//! the group graph cyclic even though the condensation is not. Each pair of
//! groups gets at most one ordering edge, pointing the way most of the
//! module dependencies between them point; the minority edges are what later
//! surface as layer violations.

use std::collections::{BTreeMap, BTreeSet};

use layerdrift_core::errors::InferenceError;

use crate::graph::condensation;
use crate::graph::scc::canonical_sccs;

/// Levels for `group_count` groups.
///
/// `votes[(a, b)]` counts module dependencies from group `a` to group `b`.
/// `fallback_heights` orders a pair whose votes are tied: the taller group
/// depends on the shorter one, and equal heights leave the pair unordered.
pub(super) fn group_levels(
    group_count: usize,
    votes: &BTreeMap<(usize, usize), u32>,
    fallback_heights: &[u32],
) -> Result<Vec<u32>, InferenceError> {
    let mut edges = majority_edges(votes, fallback_heights);
    break_cycles(group_count, &mut edges);

    condensation::heights(&condensation::dag(group_count, edges.keys().copied()))
}

/// `(a, b) -> margin`: `a` sits above `b`, winning the vote by `margin`.
fn majority_edges(
    votes: &BTreeMap<(usize, usize), u32>,
    fallback_heights: &[u32],
) -> BTreeMap<(usize, usize), u32> {
    let pairs: BTreeSet<(usize, usize)> = votes.keys().map(|&(a, b)| (a.min(b), a.max(b))).collect();
    let mut edges = BTreeMap::new();
    for (a, b) in pairs {
        let forward = votes.get(&(a, b)).copied().unwrap_or(0);
        let backward = votes.get(&(b, a)).copied().unwrap_or(0);
        let edge = match forward.cmp(&backward) {
            std::cmp::Ordering::Greater => Some(((a, b), forward - backward)),
            std::cmp::Ordering::Less => Some(((b, a), backward - forward)),
            std::cmp::Ordering::Equal => match fallback_heights[a].cmp(&fallback_heights[b]) {
                std::cmp::Ordering::Greater => Some(((a, b), 0)),
                std::cmp::Ordering::Less => Some(((b, a), 0)),
                std::cmp::Ordering::Equal => None,
            },
        };
        if let Some((key, margin)) = edge {
            edges.insert(key, margin);
        }
    }
    edges
}

/// Remove the weakest edge of every remaining cycle until none is left.
/// Ties on margin go to the smallest `(a, b)` pair.
fn break_cycles(group_count: usize, edges: &mut BTreeMap<(usize, usize), u32>) {
    loop {
        let ordering = condensation::dag(group_count, edges.keys().copied());
        let mut component_of = vec![0usize; group_count];
        let components = canonical_sccs(&ordering);
        for (c, members) in components.iter().enumerate() {
            for &m in members {
                component_of[m] = c;
            }
        }

        let mut weakest: BTreeMap<usize, ((usize, usize), u32)> = BTreeMap::new();
        for (&(a, b), &margin) in edges.iter() {
            if component_of[a] != component_of[b] {
                continue;
            }
            let slot = weakest.entry(component_of[a]).or_insert(((a, b), margin));
            if margin < slot.1 {
                *slot = ((a, b), margin);
            }
        }
        if weakest.is_empty() {
            return;
        }
        for ((a, b), margin) in weakest.into_values() {
            tracing::debug!(upper = a, lower = b, margin, "dropping layer ordering edge to break cycle");
            edges.remove(&(a, b));
        }
    }
}
