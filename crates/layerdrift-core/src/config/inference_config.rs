//! Layer inference configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Configuration for layer inference naming heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// When false every cluster gets a synthetic `layer-<level>` name.
    pub naming_heuristics: bool,
    /// Layer name -> folder or module-name tokens that identify it.
    pub layer_patterns: BTreeMap<String, Vec<String>>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            naming_heuristics: true,
            layer_patterns: default_layer_patterns(),
        }
    }
}

fn default_layer_patterns() -> BTreeMap<String, Vec<String>> {
    let table: [(&str, &[&str]); 5] = [
        ("presentation", &["client", "frontend", "web", "mobile", "ui", "view", "views", "presentation"]),
        ("gateway", &["gateway", "api", "controller", "controllers", "endpoint", "endpoints", "route", "routes", "handler", "handlers"]),
        ("service", &["service", "services", "business", "domain", "core", "logic", "usecase", "usecases"]),
        ("data", &["data", "repository", "repositories", "dao", "model", "models", "database", "db", "persistence"]),
        ("legacy", &["legacy", "deprecated"]),
    ];
    table
        .iter()
        .map(|(layer, tokens)| {
            (
                layer.to_string(),
                tokens.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect()
}
