pub mod analysis_config;
pub mod inference_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

pub use analysis_config::{
    AnalysisConfig, DanglingEdgePolicy, LayerOverride, OverrideDecision, SeverityThreshold,
};
pub use inference_config::InferenceConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayerDriftConfig {
    pub analysis: AnalysisConfig,
    pub inference: InferenceConfig,
}

impl LayerDriftConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigurationError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Reject settings that cannot be interpreted at all. Overrides naming
    /// unknown layers are not checked here; they can only be resolved once
    /// layers have been inferred.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for o in &self.analysis.layer_overrides {
            if o.source.trim().is_empty() || o.target.trim().is_empty() {
                return Err(ConfigurationError::Invalid {
                    message: "layer override with empty layer name".to_string(),
                });
            }
        }
        for (layer, tokens) in &self.inference.layer_patterns {
            if is_synthetic_name(layer) {
                return Err(ConfigurationError::Invalid {
                    message: format!("layer name {layer} is reserved for unnamed layers"),
                });
            }
            if tokens.iter().any(|t| t.trim().is_empty()) {
                return Err(ConfigurationError::Invalid {
                    message: format!("empty naming token for layer {layer}"),
                });
            }
        }
        Ok(())
    }
}

/// `layer-<n>` names are generated for clusters no heuristic could name.
fn is_synthetic_name(name: &str) -> bool {
    name.strip_prefix("layer-")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}
