//! Layer inference: cluster the graph into SCCs, level the condensation, and
//! name the resulting layers.

pub mod engine;
pub mod naming;
mod ordering;

pub use engine::{LayerInference, LayerInferenceEngine};
pub use naming::LayerNamer;
