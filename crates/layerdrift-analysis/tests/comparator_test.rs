//! Snapshot comparison: added/resolved sets, deltas, idempotence, symmetry.

use chrono::{TimeZone, Utc};
use layerdrift_analysis::comparison::compare;
use layerdrift_analysis::pipeline::{AnalysisInput, ArchitecturePipeline};
use layerdrift_core::config::{LayerDriftConfig, SeverityThreshold};
use layerdrift_core::models::{DependencyFact, ModuleFact, Snapshot, ViolationType};

// ─── Helpers ─────────────────────────────────────────────────────────

fn run(deps: &[(&str, &str)], day: u32) -> Snapshot {
    let modules = ["a", "b", "c"]
        .iter()
        .map(|id| ModuleFact::new(*id, format!("src/{id}.py")))
        .collect();
    let deps = deps.iter().map(|(s, t)| DependencyFact::new(*s, *t)).collect();
    let mut config = LayerDriftConfig::default();
    config.analysis.severity_threshold = SeverityThreshold::Low;
    ArchitecturePipeline::new(config)
        .unwrap()
        .run_at(
            &AnalysisInput::new(modules, deps),
            Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        )
        .unwrap()
}

// ─── Tests ───────────────────────────────────────────────────────────

#[test]
fn test_compare_with_itself_is_empty() {
    let s = run(&[("a", "b"), ("b", "a"), ("b", "c")], 1);
    let diff = compare(&s, &s);
    assert!(diff.added_violations.is_empty());
    assert!(diff.resolved_violations.is_empty());
    assert!(diff.summary_change.is_zero());
    assert!(diff.is_unchanged());
}

#[test]
fn test_resolving_a_cycle() {
    let before = run(&[("a", "b"), ("b", "a"), ("b", "c")], 1);
    let after = run(&[("a", "b"), ("b", "c")], 2);
    let diff = compare(&before, &after);

    assert!(diff.added_violations.is_empty());
    assert_eq!(diff.resolved_violations.len(), 2);
    assert!(diff
        .resolved_violations
        .iter()
        .all(|v| v.violation_type == ViolationType::CircularDependency));
    assert_eq!(diff.summary_change.total, -2);
    assert_eq!(diff.summary_change.high, -2);
    assert_eq!(diff.from_id, before.id());
    assert_eq!(diff.to_id, after.id());
    assert!(diff.from_timestamp < diff.to_timestamp);
}

#[test]
fn test_identity_ignores_snapshot_specific_fields() {
    // Same cycle in two runs: ids and timestamps differ but the key matches.
    let first = run(&[("a", "b"), ("b", "a")], 1);
    let second = run(&[("a", "b"), ("b", "a")], 2);
    assert_ne!(first.id(), second.id());
    assert!(compare(&first, &second).is_unchanged());
}

#[test]
fn test_symmetry() {
    let a = run(&[("a", "b"), ("b", "a")], 1);
    let b = run(&[("b", "c"), ("c", "b")], 2);
    let forward = compare(&a, &b);
    let backward = compare(&b, &a);

    assert_eq!(forward.added_violations, backward.resolved_violations);
    assert_eq!(forward.resolved_violations, backward.added_violations);
    assert_eq!(forward.summary_change.total, -backward.summary_change.total);
    assert_eq!(forward.added_violations.len(), 2);
}

#[test]
fn test_added_records_come_from_target_snapshot() {
    let a = run(&[("a", "b")], 1);
    let b = run(&[("b", "c"), ("c", "b")], 2);
    let diff = compare(&a, &b);
    for v in &diff.added_violations {
        assert!(b.violations().contains(v));
    }
    // Ordered by (type, source, target).
    let pairs: Vec<(&str, &str)> = diff
        .added_violations
        .iter()
        .map(|v| (v.source_module.as_str(), v.target_module.as_str()))
        .collect();
    assert_eq!(pairs, vec![("b", "c"), ("c", "b")]);
}
