//! Drift detection: classify every dependency against the rules and the
//! cycle structure.

pub mod detector;
pub mod filter;
pub mod severity;

pub use detector::{DetectionOutcome, DriftDetector};
pub use filter::{apply_threshold, ThresholdOutcome};
pub use severity::layer_violation_severity;
