//! Severity assignment for layer violations.

use layerdrift_core::models::Severity;

/// Severity of a forbidden layer-to-layer dependency, by level distance.
///
/// | direction                 | distance | severity |
/// |---------------------------|----------|----------|
/// | upward (reversal)         | 1        | medium   |
/// | upward (reversal)         | >= 2     | critical |
/// | level or downward, denied | 0 or 1   | medium   |
/// | downward, denied          | >= 2     | high     |
pub fn layer_violation_severity(source_level: u32, target_level: u32) -> Severity {
    if target_level > source_level {
        if target_level - source_level >= 2 {
            Severity::Critical
        } else {
            Severity::Medium
        }
    } else if source_level - target_level >= 2 {
        Severity::High
    } else {
        Severity::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_table() {
        assert_eq!(layer_violation_severity(0, 1), Severity::Medium);
        assert_eq!(layer_violation_severity(0, 2), Severity::Critical);
        assert_eq!(layer_violation_severity(1, 1), Severity::Medium);
        assert_eq!(layer_violation_severity(2, 1), Severity::Medium);
        assert_eq!(layer_violation_severity(3, 1), Severity::High);
    }
}
