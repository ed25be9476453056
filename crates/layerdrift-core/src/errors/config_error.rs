//! Configuration errors.

use super::error_code::{self, LayerDriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// Recovered by ignoring the override.
    #[error("layer override {source_layer} -> {target_layer} references unknown layer {unknown}")]
    UnknownLayer {
        source_layer: String,
        target_layer: String,
        unknown: String,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LayerDriftErrorCode for ConfigurationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownLayer { .. } => error_code::CONFIG_UNKNOWN_LAYER,
            Self::Invalid { .. } => error_code::CONFIG_INVALID,
            Self::Parse(_) => error_code::CONFIG_PARSE,
            Self::Io(_) => error_code::CONFIG_IO,
        }
    }
}
