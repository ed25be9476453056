//! DriftDetector: classification, priority order, severities.

use layerdrift_analysis::drift::{apply_threshold, DetectionOutcome, DriftDetector};
use layerdrift_analysis::graph::GraphBuilder;
use layerdrift_analysis::inference::LayerInferenceEngine;
use layerdrift_analysis::rules::RulesEngine;
use layerdrift_core::config::{
    AnalysisConfig, DanglingEdgePolicy, InferenceConfig, LayerOverride, SeverityThreshold,
};
use layerdrift_core::models::{DependencyFact, ModuleFact, Severity, Violation, ViolationType};

// ─── Helpers ─────────────────────────────────────────────────────────

fn m(id: &str, path: &str) -> ModuleFact {
    ModuleFact::new(id, path)
}

fn detect(modules: &[ModuleFact], deps: &[(&str, &str)], config: &AnalysisConfig) -> DetectionOutcome {
    let mut b = GraphBuilder::new();
    b.add_modules(modules);
    b.add_dependencies(deps.iter().map(|(s, t)| DependencyFact::new(*s, *t)));
    let graph = b.build(DanglingEdgePolicy::Drop).unwrap().graph;
    let inference = LayerInferenceEngine::new(&InferenceConfig::default())
        .infer(&graph)
        .unwrap();
    let rules = RulesEngine::new(inference.layers(), config);
    DriftDetector::new(&graph, &inference, &rules, config).detect()
}

fn find<'a>(outcome: &'a DetectionOutcome, source: &str, target: &str) -> Option<&'a Violation> {
    outcome
        .violations
        .iter()
        .find(|v| v.source_module == source && v.target_module == target)
}

/// data <- service <- presentation, plus a data module reaching up into
/// presentation (two levels) and one reaching into service (one level).
fn upward_fixture() -> (Vec<ModuleFact>, Vec<(&'static str, &'static str)>) {
    let modules = vec![
        m("ui.a", "src/ui/a.py"),
        m("ui.b", "src/ui/b.py"),
        m("ui.c", "src/ui/c.py"),
        m("svc.a", "src/services/a.py"),
        m("svc.b", "src/services/b.py"),
        m("db.a", "src/db/a.py"),
        m("db.b", "src/db/b.py"),
        m("db.c", "src/db/c.py"),
        m("db.d", "src/db/d.py"),
    ];
    let deps = vec![
        ("ui.a", "svc.a"),
        ("ui.b", "svc.a"),
        ("svc.a", "db.a"),
        ("svc.a", "db.b"),
        ("ui.b", "db.b"),
        ("db.c", "ui.c"),
        ("db.d", "svc.b"),
    ];
    (modules, deps)
}

// ─── Circular ────────────────────────────────────────────────────────

#[test]
fn test_two_node_cycle_yields_one_violation_per_edge() {
    let outcome = detect(
        &[m("A", "src/A.py"), m("B", "src/B.py")],
        &[("A", "B"), ("B", "A")],
        &AnalysisConfig::default(),
    );
    assert_eq!(outcome.violations.len(), 2);
    for v in &outcome.violations {
        assert_eq!(v.violation_type, ViolationType::CircularDependency);
        assert_eq!(v.severity, Severity::High);
        assert_eq!(v.rule_name, "acyclic_dependencies");
    }
    let ab = find(&outcome, "A", "B").unwrap();
    assert_eq!(ab.id, "circular_dependency:A->B");
    assert_eq!(ab.dependency_path.as_slice(), ["A", "B", "A"]);
}

#[test]
fn test_cycle_path_follows_shortest_route_back() {
    let outcome = detect(
        &[m("a", "src/a.py"), m("b", "src/b.py"), m("c", "src/c.py")],
        &[("a", "b"), ("b", "c"), ("c", "a")],
        &AnalysisConfig::default(),
    );
    assert_eq!(outcome.violations.len(), 3);
    let bc = find(&outcome, "b", "c").unwrap();
    assert_eq!(bc.dependency_path.as_slice(), ["b", "c", "a", "b"]);
}

#[test]
fn test_cycle_escalates_for_gateway_or_critical_path() {
    let modules = [
        m("core.a", "src/a.py").with_tag("gateway"),
        m("core.b", "src/b.py"),
        m("pay.x", "src/x.py"),
        m("pay.y", "src/y.py"),
        m("misc.p", "src/p.py"),
        m("misc.q", "src/q.py"),
    ];
    let deps = [
        ("core.a", "core.b"),
        ("core.b", "core.a"),
        ("pay.x", "pay.y"),
        ("pay.y", "pay.x"),
        ("misc.p", "misc.q"),
        ("misc.q", "misc.p"),
    ];
    let config = AnalysisConfig {
        critical_paths: vec!["pay.".to_string()],
        ..AnalysisConfig::default()
    };
    let outcome = detect(&modules, &deps, &config);

    assert_eq!(find(&outcome, "core.b", "core.a").unwrap().severity, Severity::Critical);
    assert_eq!(find(&outcome, "pay.x", "pay.y").unwrap().severity, Severity::Critical);
    assert_eq!(find(&outcome, "misc.p", "misc.q").unwrap().severity, Severity::High);
}

// ─── Layer violations ────────────────────────────────────────────────

#[test]
fn test_layer_violation_severity_by_distance() {
    let (modules, deps) = upward_fixture();
    let outcome = detect(&modules, &deps, &AnalysisConfig::default());

    assert_eq!(outcome.violations.len(), 2);
    let two_up = find(&outcome, "db.c", "ui.c").unwrap();
    assert_eq!(two_up.violation_type, ViolationType::LayerViolation);
    assert_eq!(two_up.severity, Severity::Critical);
    assert_eq!(two_up.rule_name, "data_to_presentation_forbidden");
    assert_eq!(two_up.dependency_path.as_slice(), ["db.c", "ui.c"]);

    let one_up = find(&outcome, "db.d", "svc.b").unwrap();
    assert_eq!(one_up.severity, Severity::Medium);
}

#[test]
fn test_denied_skip_level_is_high() {
    let (modules, deps) = upward_fixture();
    let config = AnalysisConfig {
        layer_overrides: vec![LayerOverride::deny("presentation", "data")],
        ..AnalysisConfig::default()
    };
    let outcome = detect(&modules, &deps, &config);
    let skip = find(&outcome, "ui.b", "db.b").unwrap();
    assert_eq!(skip.violation_type, ViolationType::LayerViolation);
    assert_eq!(skip.severity, Severity::High);
}

#[test]
fn test_allow_override_silences_upward_edge() {
    let (modules, deps) = upward_fixture();
    let config = AnalysisConfig {
        layer_overrides: vec![LayerOverride::allow("data", "service")],
        ..AnalysisConfig::default()
    };
    let outcome = detect(&modules, &deps, &config);
    assert!(find(&outcome, "db.d", "svc.b").is_none());
    assert!(find(&outcome, "db.c", "ui.c").is_some());
}

// ─── Legacy access ───────────────────────────────────────────────────

#[test]
fn test_legacy_access_within_one_layer() {
    let outcome = detect(
        &[
            m("svc.orders", "src/services/orders.py"),
            m("svc.billing", "src/services/billing.py").with_tag("legacy"),
            m("svc.old", "src/services/old.py").with_tag("legacy"),
        ],
        &[("svc.orders", "svc.billing"), ("svc.old", "svc.billing")],
        &AnalysisConfig::default(),
    );
    assert_eq!(outcome.violations.len(), 1);
    let v = &outcome.violations[0];
    assert_eq!(v.violation_type, ViolationType::LegacyAccess);
    assert_eq!(v.severity, Severity::Medium);
    assert_eq!(v.source_module, "svc.orders");
    assert_eq!(v.rule_name, "legacy_isolation");
}

// ─── Gateway bypass ──────────────────────────────────────────────────

#[test]
fn test_gateway_bypass_requires_gateway_endpoint() {
    let modules = [
        m("ui.direct", "src/ui/direct.py"),
        m("ui.routed", "src/ui/routed.py").with_tag("gateway"),
        m("svc.payments", "src/services/payments.py"),
        m("svc.refunds", "src/services/refunds.py"),
    ];
    let deps = [
        ("ui.direct", "svc.payments"),
        ("ui.routed", "svc.payments"),
        ("svc.refunds", "svc.payments"),
    ];
    let config = AnalysisConfig {
        external_facing_layers: vec!["service".to_string()],
        ..AnalysisConfig::default()
    };
    let outcome = detect(&modules, &deps, &config);

    assert_eq!(outcome.violations.len(), 1);
    let v = find(&outcome, "ui.direct", "svc.payments").unwrap();
    assert_eq!(v.violation_type, ViolationType::GatewayBypass);
    assert_eq!(v.severity, Severity::High);
}

// ─── Priority and switches ───────────────────────────────────────────

#[test]
fn test_circular_beats_legacy_and_disabling_falls_through() {
    let modules = [m("a", "src/a.py"), m("b", "src/b.py").with_tag("legacy")];
    let deps = [("a", "b"), ("b", "a")];

    let outcome = detect(&modules, &deps, &AnalysisConfig::default());
    assert_eq!(find(&outcome, "a", "b").unwrap().violation_type, ViolationType::CircularDependency);

    let config = AnalysisConfig {
        detect_circular_dependencies: false,
        ..AnalysisConfig::default()
    };
    let outcome = detect(&modules, &deps, &config);
    assert_eq!(outcome.violations.len(), 1);
    assert_eq!(find(&outcome, "a", "b").unwrap().violation_type, ViolationType::LegacyAccess);
}

#[test]
fn test_circular_beats_layer_violation() {
    let modules = [m("a", "src/a.py"), m("b", "src/b.py")];
    let deps = [("a", "b"), ("b", "a")];
    let deny_self = AnalysisConfig {
        layer_overrides: vec![LayerOverride::deny("layer-0", "layer-0")],
        ..AnalysisConfig::default()
    };
    let outcome = detect(&modules, &deps, &deny_self);
    assert!(outcome
        .violations
        .iter()
        .all(|v| v.violation_type == ViolationType::CircularDependency));

    let config = AnalysisConfig {
        detect_circular_dependencies: false,
        ..deny_self
    };
    let outcome = detect(&modules, &deps, &config);
    assert_eq!(outcome.violations.len(), 2);
    assert!(outcome
        .violations
        .iter()
        .all(|v| v.violation_type == ViolationType::LayerViolation));
}

#[test]
fn test_all_categories_disabled() {
    let (modules, deps) = upward_fixture();
    let config = AnalysisConfig {
        detect_circular_dependencies: false,
        detect_layer_violations: false,
        detect_legacy_access: false,
        detect_gateway_bypass: false,
        ..AnalysisConfig::default()
    };
    let outcome = detect(&modules, &deps, &config);
    assert!(outcome.violations.is_empty());
    assert!(outcome.edge_types.iter().all(Option::is_none));
}

#[test]
fn test_at_most_one_violation_per_edge() {
    let (modules, deps) = upward_fixture();
    let outcome = detect(&modules, &deps, &AnalysisConfig::default());
    assert_eq!(outcome.edge_types.len(), deps.len());
    assert_eq!(
        outcome.edge_types.iter().filter(|t| t.is_some()).count(),
        outcome.violations.len()
    );
    let by_type = outcome.count_by_type();
    assert_eq!(by_type.get(&ViolationType::LayerViolation), Some(&2));
}

// ─── Threshold ───────────────────────────────────────────────────────

#[test]
fn test_threshold_filters_after_detection() {
    let (modules, deps) = upward_fixture();
    let outcome = detect(&modules, &deps, &AnalysisConfig::default());
    let result = apply_threshold(outcome.violations, SeverityThreshold::High);

    assert_eq!(result.kept.len(), 1);
    assert_eq!(result.kept[0].severity, Severity::Critical);
    assert_eq!(result.filtered, 1);
}
