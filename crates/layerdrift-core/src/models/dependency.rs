//! Dependencies: directed edges between modules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GraphBuildError;

use super::violation::ViolationType;

/// How a dependency was expressed in source.
///
/// Serialized under its canonical name; deserialized through [`FromStr`], so
/// extractor spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DependencyKind {
    #[default]
    Import,
    FromImport,
    DynamicImport,
    ApiCall,
    DatabaseAccess,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::FromImport => "from_import",
            Self::DynamicImport => "dynamic_import",
            Self::ApiCall => "api_call",
            Self::DatabaseAccess => "database_access",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyKind {
    type Err = GraphBuildError;

    /// Accepts the canonical names plus the extractor's language-specific
    /// spellings (`require`, `use`, `es6_import`, ...), which all mean a
    /// direct import.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "import" | "require" | "use" | "using" | "include" | "es6_import" | "static_import" => {
                Ok(Self::Import)
            }
            "from_import" => Ok(Self::FromImport),
            "dynamic_import" => Ok(Self::DynamicImport),
            "api_call" => Ok(Self::ApiCall),
            "database_access" => Ok(Self::DatabaseAccess),
            other => Err(GraphBuildError::UnknownDependencyKind {
                kind: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for DependencyKind {
    type Error = GraphBuildError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A raw dependency as reported by the import extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyFact {
    pub source_id: String,
    pub target_id: String,
    #[serde(default)]
    pub kind: DependencyKind,
}

impl DependencyFact {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: DependencyKind::Import,
        }
    }

    pub fn with_kind(mut self, kind: DependencyKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A dependency edge as published in a snapshot, annotated by the detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(rename = "from")]
    pub source: String,
    #[serde(rename = "to")]
    pub target: String,
    pub kind: DependencyKind,
    pub is_violation: bool,
    pub violation_type: Option<ViolationType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LayerDriftErrorCode;

    #[test]
    fn extractor_spellings_parse_as_import() {
        for spelling in ["require", "use", "ES6_Import", " include "] {
            assert_eq!(spelling.parse::<DependencyKind>().unwrap(), DependencyKind::Import);
        }
        assert_eq!("api_call".parse::<DependencyKind>().unwrap(), DependencyKind::ApiCall);
    }

    #[test]
    fn unknown_kind_has_error_code() {
        let err = "telepathy".parse::<DependencyKind>().unwrap_err();
        assert_eq!(err.error_code(), "GRAPH_UNKNOWN_DEPENDENCY_KIND");
    }

    #[test]
    fn facts_deserialize_through_from_str() {
        let fact: DependencyFact =
            serde_json::from_str(r#"{"source_id": "a", "target_id": "b", "kind": "require"}"#).unwrap();
        assert_eq!(fact.kind, DependencyKind::Import);

        let fact: DependencyFact = serde_json::from_str(r#"{"source_id": "a", "target_id": "b"}"#).unwrap();
        assert_eq!(fact.kind, DependencyKind::Import);

        let err = serde_json::from_str::<DependencyFact>(r#"{"source_id": "a", "target_id": "b", "kind": "x"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown dependency kind"));
    }

    #[test]
    fn kind_serializes_canonically() {
        assert_eq!(serde_json::to_string(&DependencyKind::DatabaseAccess).unwrap(), "\"database_access\"");
    }
}
