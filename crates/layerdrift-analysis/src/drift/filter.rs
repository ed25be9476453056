//! Severity threshold, applied at the output boundary.

use layerdrift_core::config::SeverityThreshold;
use layerdrift_core::models::Violation;

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdOutcome {
    pub kept: Vec<Violation>,
    pub filtered: usize,
}

/// Keep violations at or above `threshold`, preserving order.
pub fn apply_threshold(violations: Vec<Violation>, threshold: SeverityThreshold) -> ThresholdOutcome {
    let before = violations.len();
    let kept: Vec<Violation> = violations
        .into_iter()
        .filter(|v| threshold.admits(v.severity))
        .collect();
    ThresholdOutcome {
        filtered: before - kept.len(),
        kept,
    }
}
