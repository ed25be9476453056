//! # layerdrift-analysis
//!
//! Analysis engine for layerdrift.
//! Contains the dependency graph, layer inference, rules engine, drift
//! detector, snapshot comparison, snapshot history, and the pipeline that
//! ties them together.

pub mod comparison;
pub mod drift;
pub mod graph;
pub mod history;
pub mod inference;
pub mod pipeline;
pub mod rules;

pub use comparison::compare;
pub use drift::{DetectionOutcome, DriftDetector};
pub use graph::{DependencyGraph, GraphBuild, GraphBuilder};
pub use history::InMemorySnapshotStore;
pub use inference::{LayerInference, LayerInferenceEngine};
pub use pipeline::{AnalysisInput, ArchitecturePipeline};
pub use rules::{DenialReason, RuleDecision, RulesEngine};
