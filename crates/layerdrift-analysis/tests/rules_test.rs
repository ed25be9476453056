//! RulesEngine: default monotonic rule, same-level policy, overrides.

use layerdrift_analysis::rules::{DenialReason, RuleDecision, RulesEngine};
use layerdrift_core::config::{AnalysisConfig, LayerOverride};
use layerdrift_core::errors::ConfigurationError;
use layerdrift_core::models::Layer;
use layerdrift_core::LayerDriftErrorCode;

// ─── Helpers ─────────────────────────────────────────────────────────

fn layer(name: &str, level: u32) -> Layer {
    Layer {
        name: name.to_string(),
        level,
        allowed_dependencies: Vec::new(),
        modules: Vec::new(),
        synthetic: false,
        external_facing: false,
    }
}

fn layers() -> Vec<Layer> {
    vec![
        layer("data", 0),
        layer("infra", 0),
        layer("service", 1),
        layer("gateway", 2),
        layer("presentation", 3),
    ]
}

fn engine(config: AnalysisConfig) -> RulesEngine {
    RulesEngine::new(&layers(), &config)
}

// ─── Tests ───────────────────────────────────────────────────────────

#[test]
fn test_downward_and_same_layer_allowed() {
    let rules = engine(AnalysisConfig::default());
    assert!(rules.is_allowed("presentation", "data"));
    assert!(rules.is_allowed("service", "data"));
    assert!(rules.is_allowed("service", "service"));
    assert!(rules.is_allowed("data", "infra"));
}

#[test]
fn test_upward_denied_with_levels() {
    let rules = engine(AnalysisConfig::default());
    assert_eq!(
        rules.decide("data", "gateway"),
        RuleDecision::Denied(DenialReason::Upward {
            source_level: 0,
            target_level: 2
        })
    );
}

#[test]
fn test_same_level_can_be_forbidden() {
    let rules = engine(AnalysisConfig {
        allow_same_level: false,
        ..AnalysisConfig::default()
    });
    assert_eq!(
        rules.decide("data", "infra"),
        RuleDecision::Denied(DenialReason::SameLevel { level: 0 })
    );
    // A layer may always use itself.
    assert!(rules.is_allowed("data", "data"));
}

#[test]
fn test_overrides_replace_default() {
    let rules = engine(AnalysisConfig {
        layer_overrides: vec![
            LayerOverride::allow("service", "gateway"),
            LayerOverride::deny("presentation", "data"),
        ],
        ..AnalysisConfig::default()
    });
    assert!(rules.is_allowed("service", "gateway"));
    assert_eq!(
        rules.decide("presentation", "data"),
        RuleDecision::Denied(DenialReason::ExplicitDeny)
    );
    // Overrides are directional.
    assert!(rules.is_allowed("gateway", "service"));
}

#[test]
fn test_deny_override_can_forbid_same_layer() {
    let rules = engine(AnalysisConfig {
        layer_overrides: vec![LayerOverride::deny("service", "service")],
        ..AnalysisConfig::default()
    });
    assert!(!rules.is_allowed("service", "service"));
}

#[test]
fn test_unknown_override_is_ignored() {
    let rules = engine(AnalysisConfig {
        layer_overrides: vec![
            LayerOverride::deny("service", "ghost"),
            LayerOverride::deny("presentation", "data"),
        ],
        ..AnalysisConfig::default()
    });

    assert_eq!(rules.ignored_overrides().len(), 1);
    let err = &rules.ignored_overrides()[0];
    assert!(matches!(
        err,
        ConfigurationError::UnknownLayer { unknown, .. } if unknown == "ghost"
    ));
    assert_eq!(err.error_code(), "CONFIG_UNKNOWN_LAYER");
    assert!(!rules.is_allowed("presentation", "data"));
}

#[test]
fn test_allowed_dependencies_listing() {
    let rules = engine(AnalysisConfig {
        layer_overrides: vec![LayerOverride::deny("gateway", "infra")],
        ..AnalysisConfig::default()
    });
    let mut ls = layers();
    rules.apply_allowed_dependencies(&mut ls);

    let gateway = ls.iter().find(|l| l.name == "gateway").unwrap();
    assert_eq!(gateway.allowed_dependencies, vec!["data", "service"]);
    let data = ls.iter().find(|l| l.name == "data").unwrap();
    assert_eq!(data.allowed_dependencies, vec!["infra"]);
    assert_eq!(rules.level_of("presentation"), Some(3));
}

#[test]
fn test_decisions_are_pure() {
    let a = engine(AnalysisConfig::default());
    let b = engine(AnalysisConfig::default());
    for s in ["data", "infra", "service", "gateway", "presentation"] {
        for t in ["data", "infra", "service", "gateway", "presentation"] {
            assert_eq!(a.decide(s, t), b.decide(s, t));
            assert_eq!(a.decide(s, t), a.decide(s, t));
        }
    }
}
