//! Drift detection configuration.

use serde::{Deserialize, Serialize};

use crate::models::Severity;

/// Minimum severity a violation must have to appear in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityThreshold {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl SeverityThreshold {
    pub fn as_severity(self) -> Severity {
        match self {
            Self::Low => Severity::Low,
            Self::Medium => Severity::Medium,
            Self::High => Severity::High,
            Self::Critical => Severity::Critical,
        }
    }

    pub fn admits(self, severity: Severity) -> bool {
        severity >= self.as_severity()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideDecision {
    Allow,
    Deny,
}

/// Explicit allow/deny for one ordered layer pair, overriding the default
/// monotonic rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerOverride {
    pub source: String,
    pub target: String,
    pub decision: OverrideDecision,
}

impl LayerOverride {
    pub fn allow(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            decision: OverrideDecision::Allow,
        }
    }

    pub fn deny(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            decision: OverrideDecision::Deny,
        }
    }
}

/// What the graph builder does with an edge naming an unknown module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DanglingEdgePolicy {
    /// Drop the edge, log it, and count it in snapshot metadata.
    #[default]
    Drop,
    /// Fail the run on the first dangling edge.
    Abort,
}

/// Configuration for violation detection and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub detect_circular_dependencies: bool,
    pub detect_layer_violations: bool,
    pub detect_legacy_access: bool,
    pub detect_gateway_bypass: bool,
    /// Applied after detection; detection always runs at full fidelity.
    pub severity_threshold: SeverityThreshold,
    /// Whether distinct layers sharing a level may depend on each other.
    pub allow_same_level: bool,
    pub layer_overrides: Vec<LayerOverride>,
    /// Layers whose modules must only be reached through a gateway module.
    pub external_facing_layers: Vec<String>,
    /// Module ids on a critical path. An entry ending in `.`, `/` or `::`
    /// matches every module id with that prefix.
    pub critical_paths: Vec<String>,
    pub dangling_edges: DanglingEdgePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            detect_circular_dependencies: true,
            detect_layer_violations: true,
            detect_legacy_access: true,
            detect_gateway_bypass: true,
            severity_threshold: SeverityThreshold::Medium,
            allow_same_level: true,
            layer_overrides: Vec::new(),
            external_facing_layers: Vec::new(),
            critical_paths: Vec::new(),
            dangling_edges: DanglingEdgePolicy::Drop,
        }
    }
}

impl AnalysisConfig {
    /// Whether a module id lies on a configured critical path.
    pub fn is_critical_path(&self, module_id: &str) -> bool {
        self.critical_paths.iter().any(|entry| {
            if entry.ends_with('.') || entry.ends_with('/') || entry.ends_with("::") {
                module_id.starts_with(entry.as_str())
            } else {
                module_id == entry
            }
        })
    }

    pub fn is_external_facing(&self, layer: &str) -> bool {
        self.external_facing_layers.iter().any(|l| l == layer)
    }
}
