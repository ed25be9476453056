//! Inferred architectural layers.

use serde::{Deserialize, Serialize};

/// One tier of the inferred architecture.
///
/// Lower `level` means more foundational. Levels are generated by inference
/// and are dense, starting at 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub level: u32,
    /// Names of the other layers this layer may depend on.
    pub allowed_dependencies: Vec<String>,
    /// Module ids assigned to this layer, sorted.
    pub modules: Vec<String>,
    /// True when the name came from the `layer-<level>` fallback rather than
    /// a folder naming heuristic.
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default)]
    pub external_facing: bool,
}

impl Layer {
    /// Name used for layers no naming heuristic could label.
    pub fn synthetic_name(level: u32) -> String {
        format!("layer-{level}")
    }
}
