//! Rules engine: which layer-to-layer dependencies are permitted.

pub mod engine;

pub use engine::{DenialReason, RuleDecision, RulesEngine};
