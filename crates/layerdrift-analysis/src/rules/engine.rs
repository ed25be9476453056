//! RulesEngine: permitted dependency directions from layer order plus
//! configured overrides.

use std::collections::BTreeMap;

use layerdrift_core::config::{AnalysisConfig, OverrideDecision};
use layerdrift_core::errors::ConfigurationError;
use layerdrift_core::models::Layer;

/// Outcome of a rule query for one ordered layer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDecision {
    Allowed,
    Denied(DenialReason),
}

impl RuleDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Why a dependency direction is forbidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// Denied by a configured override.
    ExplicitDeny,
    /// Points at a less foundational layer.
    Upward { source_level: u32, target_level: u32 },
    /// Crosses between distinct layers on one level with `allow_same_level` off.
    SameLevel { level: u32 },
    /// One of the layers is not part of the inferred architecture.
    UnknownLayer { layer: String },
}

impl DenialReason {
    pub fn describe(&self) -> String {
        match self {
            Self::ExplicitDeny => "denied by a layer override".to_string(),
            Self::Upward {
                source_level,
                target_level,
            } => format!("dependency points upward from level {source_level} to level {target_level}"),
            Self::SameLevel { level } => {
                format!("dependencies between distinct layers on level {level} are not allowed")
            }
            Self::UnknownLayer { layer } => format!("layer {layer} is not part of the architecture"),
        }
    }
}

/// Pure function of (layer order, configuration).
///
/// Default rule: a layer may depend on itself and on any layer with a lower
/// level. Same-level dependencies between distinct layers follow
/// `allow_same_level`. Explicit overrides replace the default for their
/// exact pair; when a pair is both allowed and denied, deny wins.
#[derive(Debug)]
pub struct RulesEngine {
    levels: BTreeMap<String, u32>,
    allow_same_level: bool,
    overrides: BTreeMap<(String, String), OverrideDecision>,
    ignored: Vec<ConfigurationError>,
}

impl RulesEngine {
    /// Overrides naming a layer that was not inferred are ignored with a
    /// warning and kept in [`ignored_overrides`](Self::ignored_overrides).
    pub fn new(layers: &[Layer], config: &AnalysisConfig) -> Self {
        let levels: BTreeMap<String, u32> = layers.iter().map(|l| (l.name.clone(), l.level)).collect();
        let mut overrides = BTreeMap::new();
        let mut ignored = Vec::new();

        for o in &config.layer_overrides {
            let unknown = [&o.source, &o.target]
                .into_iter()
                .find(|name| !levels.contains_key(name.as_str()));
            if let Some(unknown) = unknown {
                tracing::warn!(
                    source_layer = %o.source,
                    target_layer = %o.target,
                    unknown = %unknown,
                    "ignoring layer override that references an unknown layer"
                );
                ignored.push(ConfigurationError::UnknownLayer {
                    source_layer: o.source.clone(),
                    target_layer: o.target.clone(),
                    unknown: unknown.clone(),
                });
                continue;
            }
            let slot = overrides
                .entry((o.source.clone(), o.target.clone()))
                .or_insert(o.decision);
            if o.decision == OverrideDecision::Deny {
                *slot = OverrideDecision::Deny;
            }
        }

        Self {
            levels,
            allow_same_level: config.allow_same_level,
            overrides,
            ignored,
        }
    }

    pub fn decide(&self, source_layer: &str, target_layer: &str) -> RuleDecision {
        if let Some(decision) = self
            .overrides
            .get(&(source_layer.to_string(), target_layer.to_string()))
        {
            return match decision {
                OverrideDecision::Allow => RuleDecision::Allowed,
                OverrideDecision::Deny => RuleDecision::Denied(DenialReason::ExplicitDeny),
            };
        }

        let (Some(&source_level), Some(&target_level)) =
            (self.levels.get(source_layer), self.levels.get(target_layer))
        else {
            let layer = if self.levels.contains_key(source_layer) {
                target_layer
            } else {
                source_layer
            };
            return RuleDecision::Denied(DenialReason::UnknownLayer {
                layer: layer.to_string(),
            });
        };

        if source_layer == target_layer || target_level < source_level {
            RuleDecision::Allowed
        } else if target_level == source_level {
            if self.allow_same_level {
                RuleDecision::Allowed
            } else {
                RuleDecision::Denied(DenialReason::SameLevel { level: source_level })
            }
        } else {
            RuleDecision::Denied(DenialReason::Upward {
                source_level,
                target_level,
            })
        }
    }

    pub fn is_allowed(&self, source_layer: &str, target_layer: &str) -> bool {
        self.decide(source_layer, target_layer).is_allowed()
    }

    pub fn level_of(&self, layer: &str) -> Option<u32> {
        self.levels.get(layer).copied()
    }

    /// Other layers `source_layer` may depend on, ordered by level then name.
    pub fn allowed_targets(&self, source_layer: &str) -> Vec<String> {
        let mut targets: Vec<(&u32, &String)> = self
            .levels
            .iter()
            .filter(|(name, _)| name.as_str() != source_layer && self.is_allowed(source_layer, name))
            .map(|(name, level)| (level, name))
            .collect();
        targets.sort();
        targets.into_iter().map(|(_, name)| name.clone()).collect()
    }

    /// Fill in `allowed_dependencies` for every layer.
    pub fn apply_allowed_dependencies(&self, layers: &mut [Layer]) {
        for layer in layers.iter_mut() {
            layer.allowed_dependencies = self.allowed_targets(&layer.name);
        }
    }

    pub fn ignored_overrides(&self) -> &[ConfigurationError] {
        &self.ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerdrift_core::config::LayerOverride;

    fn layer(name: &str, level: u32) -> Layer {
        Layer {
            name: name.to_string(),
            level,
            allowed_dependencies: Vec::new(),
            modules: Vec::new(),
            synthetic: false,
            external_facing: false,
        }
    }

    #[test]
    fn unknown_layer_is_denied() {
        let engine = RulesEngine::new(&[layer("data", 0)], &AnalysisConfig::default());
        assert_eq!(
            engine.decide("data", "ghost"),
            RuleDecision::Denied(DenialReason::UnknownLayer {
                layer: "ghost".to_string()
            })
        );
    }

    #[test]
    fn deny_beats_allow_in_either_order() {
        let layers = [layer("data", 0), layer("service", 1)];
        for overrides in [
            vec![LayerOverride::allow("data", "service"), LayerOverride::deny("data", "service")],
            vec![LayerOverride::deny("data", "service"), LayerOverride::allow("data", "service")],
        ] {
            let config = AnalysisConfig {
                layer_overrides: overrides,
                ..AnalysisConfig::default()
            };
            assert!(!RulesEngine::new(&layers, &config).is_allowed("data", "service"));
        }
    }
}
