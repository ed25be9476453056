//! Modules: the nodes of the dependency graph.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Tag marking a module as part of a legacy system.
pub const TAG_LEGACY: &str = "legacy";
/// Tag marking a module as a sanctioned entry point for external-facing code.
pub const TAG_GATEWAY: &str = "gateway";

/// A module as reported by the import extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFact {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_test: bool,
}

impl ModuleFact {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            tags: Vec::new(),
            is_test: false,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A deduplicated module inside one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub label: String,
    pub file_path: String,
    /// Inferred layer name. `None` until layer inference has run.
    pub layer: Option<String>,
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub is_test: bool,
}

impl Module {
    /// Create a module from its first fact. Tags are normalized to lowercase.
    pub fn from_fact(fact: &ModuleFact) -> Self {
        let mut module = Self {
            id: fact.id.clone(),
            label: label_for(&fact.id),
            file_path: fact.path.clone(),
            layer: None,
            tags: BTreeSet::new(),
            is_test: fact.is_test,
        };
        module.merge_tags(&fact.tags);
        module
    }

    /// Merge additional tags from a duplicate fact.
    pub fn merge_tags(&mut self, tags: &[String]) {
        for tag in tags {
            let tag = tag.trim().to_ascii_lowercase();
            if !tag.is_empty() {
                self.tags.insert(tag);
            }
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_legacy(&self) -> bool {
        self.has_tag(TAG_LEGACY)
    }

    pub fn is_gateway(&self) -> bool {
        self.has_tag(TAG_GATEWAY)
    }

    /// Copy of this module with its inferred layer filled in.
    pub fn with_layer(&self, layer: impl Into<String>) -> Self {
        let mut module = self.clone();
        module.layer = Some(layer.into());
        module
    }
}

/// Display label: the last segment of a path-derived module id.
///
/// Path-like ids (`src/app/user.ts`) keep their file name; dotted ids
/// (`app.services.user`) keep the final component.
pub fn label_for(id: &str) -> String {
    let last = id
        .rsplit(|c| c == '/' || c == '\\' || c == ':')
        .find(|s| !s.is_empty())
        .unwrap_or(id);
    if id.contains('/') || id.contains('\\') {
        return last.to_string();
    }
    last.rsplit('.').find(|s| !s.is_empty()).unwrap_or(last).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_for_dotted_and_path_ids() {
        assert_eq!(label_for("app.services.user_service"), "user_service");
        assert_eq!(label_for("src/app/user.ts"), "user.ts");
        assert_eq!(label_for("crate::graph::builder"), "builder");
        assert_eq!(label_for("solo"), "solo");
    }

    #[test]
    fn tags_are_normalized_and_merged() {
        let fact = ModuleFact::new("a", "a.py").with_tag(" Legacy ");
        let mut module = Module::from_fact(&fact);
        module.merge_tags(&["GATEWAY".to_string(), "".to_string()]);
        assert!(module.is_legacy());
        assert!(module.is_gateway());
        assert_eq!(module.tags.len(), 2);
    }
}
