//! Materialized input for one analysis run.

use serde::{Deserialize, Serialize};

use layerdrift_core::models::{DependencyFact, ModuleFact, RepositoryInfo};

/// Module and dependency facts from the import extractor. Order does not
/// matter and duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub repository: Option<RepositoryInfo>,
    pub modules: Vec<ModuleFact>,
    #[serde(default)]
    pub dependencies: Vec<DependencyFact>,
}

impl AnalysisInput {
    pub fn new(modules: Vec<ModuleFact>, dependencies: Vec<DependencyFact>) -> Self {
        Self {
            repository: None,
            modules,
            dependencies,
        }
    }

    pub fn with_repository(mut self, repository: RepositoryInfo) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
