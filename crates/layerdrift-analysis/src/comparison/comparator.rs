//! Diff two snapshots by violation identity.
//!
//! Laws:
//! - `compare(S, S)` has no added or resolved violations and a zero summary change.
//! - `compare(A, B).added == compare(B, A).resolved`, and the reverse.

use std::collections::BTreeMap;

use layerdrift_core::models::{
    Snapshot, SnapshotComparison, SummaryChange, Violation, ViolationKey,
};

/// Compare `from` to `to`, in the order given.
///
/// Violations match on (type, source module, target module). Added records
/// come from `to` and resolved records from `from`, each ordered by key.
pub fn compare(from: &Snapshot, to: &Snapshot) -> SnapshotComparison {
    let from_keys = keyed(from.violations());
    let to_keys = keyed(to.violations());

    let added = to_keys
        .iter()
        .filter(|(key, _)| !from_keys.contains_key(*key))
        .map(|(_, v)| (*v).clone())
        .collect();
    let resolved = from_keys
        .iter()
        .filter(|(key, _)| !to_keys.contains_key(*key))
        .map(|(_, v)| (*v).clone())
        .collect();

    SnapshotComparison {
        from_id: from.id().to_string(),
        to_id: to.id().to_string(),
        from_timestamp: from.timestamp(),
        to_timestamp: to.timestamp(),
        added_violations: added,
        resolved_violations: resolved,
        summary_change: SummaryChange::between(from.summary(), to.summary()),
    }
}

fn keyed(violations: &[Violation]) -> BTreeMap<ViolationKey, &Violation> {
    violations.iter().map(|v| (v.key(), v)).collect()
}
