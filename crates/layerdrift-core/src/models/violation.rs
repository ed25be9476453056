//! Violations, severities, and per-severity summaries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Violation severity. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// One step more severe, saturating at `Critical`.
    pub fn escalate(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Critical => Self::Critical,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of drift categories.
///
/// Declaration order is the classification priority: when one dependency
/// satisfies several conditions, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    CircularDependency,
    LayerViolation,
    LegacyAccess,
    GatewayBypass,
}

impl ViolationType {
    /// All categories in priority order.
    pub const ALL: [ViolationType; 4] = [
        ViolationType::CircularDependency,
        ViolationType::LayerViolation,
        ViolationType::LegacyAccess,
        ViolationType::GatewayBypass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CircularDependency => "circular_dependency",
            Self::LayerViolation => "layer_violation",
            Self::LegacyAccess => "legacy_access",
            Self::GatewayBypass => "gateway_bypass",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected deviation from the inferred architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub id: String,
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    pub severity: Severity,
    pub source_module: String,
    pub target_module: String,
    pub title: String,
    pub description: String,
    pub dependency_path: SmallVec<[String; 2]>,
    pub rule_name: String,
    pub pattern_broken: String,
    pub detected_at: DateTime<Utc>,
}

impl Violation {
    /// Stable id for a violation on one edge. Unique within a snapshot since
    /// each dependency yields at most one violation.
    pub fn make_id(violation_type: ViolationType, source: &str, target: &str) -> String {
        format!("{}:{}->{}", violation_type.as_str(), source, target)
    }

    /// Identity used when comparing snapshots.
    pub fn key(&self) -> ViolationKey {
        ViolationKey {
            violation_type: self.violation_type,
            source_module: self.source_module.clone(),
            target_module: self.target_module.clone(),
        }
    }
}

/// (type, source, target): what makes two violations "the same" across runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViolationKey {
    pub violation_type: ViolationType,
    pub source_module: String,
    pub target_module: String,
}

/// Violation counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ViolationSummary {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut summary = Self::default();
        for violation in violations {
            summary.total += 1;
            match violation.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
        }
        summary
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}
