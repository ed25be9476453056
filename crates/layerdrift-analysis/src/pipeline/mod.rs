//! Pipeline entry point: facts in, snapshot out.

mod assemble;
pub mod input;
pub mod runner;

pub use input::AnalysisInput;
pub use runner::ArchitecturePipeline;
