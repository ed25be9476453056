//! Folder and module-name heuristics for labelling layers.

use std::collections::BTreeMap;

use layerdrift_core::config::InferenceConfig;
use layerdrift_core::models::Module;

/// Maps path tokens to configured layer names.
#[derive(Debug, Clone, Default)]
pub struct LayerNamer {
    /// token (lowercase) -> layer name
    tokens: BTreeMap<String, String>,
}

impl LayerNamer {
    /// A token listed under several layers belongs to the alphabetically
    /// first one.
    pub fn new(config: &InferenceConfig) -> Self {
        let mut tokens = BTreeMap::new();
        for (layer, patterns) in &config.layer_patterns {
            for token in patterns {
                tokens
                    .entry(token.trim().to_ascii_lowercase())
                    .or_insert_with(|| layer.clone());
            }
        }
        Self { tokens }
    }

    /// Layer name suggested by a module's path, or by its id when the path
    /// carries no recognizable token.
    ///
    /// Directory segments are tried innermost first, then the file stem
    /// split on `_` and `-`. `src/api/user_service.py` names `gateway`
    /// (from `api`) under the default patterns, not `service`.
    pub fn name_module(&self, module: &Module) -> Option<&str> {
        self.name_path(&module.file_path)
            .or_else(|| self.name_path(&module.id.replace("::", "/").replace('.', "/")))
    }

    /// Common name of a cluster: only when every member agrees.
    pub fn name_cluster<'m>(&self, mut members: impl Iterator<Item = &'m Module>) -> Option<&str> {
        let first = self.name_module(members.next()?)?;
        members
            .all(|m| self.name_module(m) == Some(first))
            .then_some(first)
    }

    fn name_path(&self, path: &str) -> Option<&str> {
        let normalized = path.replace('\\', "/");
        let mut segments: Vec<&str> = normalized
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .collect();
        let file = segments.pop()?;

        for dir in segments.iter().rev() {
            if let Some(layer) = self.lookup(dir) {
                return Some(layer);
            }
        }

        let stem = file.split_once('.').map_or(file, |(stem, _)| stem);
        stem.split(['_', '-'])
            .chain(std::iter::once(stem))
            .find_map(|token| self.lookup(token))
    }

    fn lookup(&self, token: &str) -> Option<&str> {
        if token.is_empty() {
            return None;
        }
        self.tokens
            .get(token.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }
}
