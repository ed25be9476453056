//! Snapshot-to-snapshot comparison results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::violation::{Severity, Violation, ViolationSummary};

/// Signed change in violation counts between two snapshots (`to - from`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryChange {
    pub total: i64,
    pub critical: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

impl SummaryChange {
    pub fn between(from: &ViolationSummary, to: &ViolationSummary) -> Self {
        let delta = |a: usize, b: usize| b as i64 - a as i64;
        Self {
            total: delta(from.total, to.total),
            critical: delta(from.critical, to.critical),
            high: delta(from.high, to.high),
            medium: delta(from.medium, to.medium),
            low: delta(from.low, to.low),
        }
    }

    pub fn get(&self, severity: Severity) -> i64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Derived, non-persisted view over two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotComparison {
    pub from_id: String,
    pub to_id: String,
    pub from_timestamp: DateTime<Utc>,
    pub to_timestamp: DateTime<Utc>,
    /// Violations present in `to` but not in `from`, as recorded in `to`.
    pub added_violations: Vec<Violation>,
    /// Violations present in `from` but not in `to`, as recorded in `from`.
    pub resolved_violations: Vec<Violation>,
    pub summary_change: SummaryChange,
}

impl SnapshotComparison {
    pub fn is_unchanged(&self) -> bool {
        self.added_violations.is_empty() && self.resolved_violations.is_empty() && self.summary_change.is_zero()
    }
}
