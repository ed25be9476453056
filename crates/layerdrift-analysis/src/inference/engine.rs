//! LayerInferenceEngine: assigns every module to a leveled, named layer.

use std::collections::BTreeMap;

use layerdrift_core::config::InferenceConfig;
use layerdrift_core::errors::InferenceError;
use layerdrift_core::models::Layer;
use layerdrift_core::NodeId;

use crate::graph::{Condensation, DependencyGraph};

use super::naming::LayerNamer;
use super::ordering;

/// Result of layer inference over one graph.
#[derive(Debug, Clone)]
pub struct LayerInference {
    condensation: Condensation,
    /// Sorted by `(level, name)`.
    layers: Vec<Layer>,
    layer_of_node: Vec<usize>,
}

impl LayerInference {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn condensation(&self) -> &Condensation {
        &self.condensation
    }

    pub fn layer_of(&self, node: NodeId) -> &Layer {
        &self.layers[self.layer_of_node[node.index()]]
    }

    pub fn level_of(&self, node: NodeId) -> u32 {
        self.layer_of(node).level
    }

    pub fn same_cluster(&self, a: NodeId, b: NodeId) -> bool {
        self.condensation.cluster_of(a) == self.condensation.cluster_of(b)
    }

    /// Members of the cluster (SCC) containing `node`, ascending.
    pub fn cluster_members(&self, node: NodeId) -> &[NodeId] {
        self.condensation.members(self.condensation.cluster_of(node))
    }

    pub fn max_level(&self) -> Option<u32> {
        self.layers.iter().map(|l| l.level).max()
    }
}

/// Infers layers from the dependency structure.
///
/// 1. Collapse strongly connected components into clusters.
/// 2. Name each cluster from folder heuristics, when every member agrees.
/// 3. Merge clusters that share a name; unnamed clusters stay separate.
/// 4. Level the groups: a group that depends on nothing is level 0, any
///    other sits one above the highest group it depends on. Between named
///    groups the direction most dependencies take decides which is higher.
/// 5. Unnamed groups become `layer-<level>`; those sharing a level merge.
#[derive(Debug, Clone)]
pub struct LayerInferenceEngine {
    naming_heuristics: bool,
    namer: LayerNamer,
}

struct Group<'n> {
    token: Option<&'n str>,
    height: u32,
}

#[derive(Default)]
struct LayerAcc {
    level: u32,
    synthetic: bool,
    modules: Vec<String>,
}

impl LayerInferenceEngine {
    pub fn new(config: &InferenceConfig) -> Self {
        Self {
            naming_heuristics: config.naming_heuristics,
            namer: LayerNamer::new(config),
        }
    }

    pub fn infer(&self, graph: &DependencyGraph) -> Result<LayerInference, InferenceError> {
        let condensation = Condensation::new(graph);
        let heights = condensation.heights()?;
        let k = condensation.cluster_count();

        let mut groups: Vec<Group<'_>> = Vec::new();
        let mut group_of_cluster = vec![0usize; k];
        let mut by_token: BTreeMap<&str, usize> = BTreeMap::new();
        for c in 0..k {
            let token = if self.naming_heuristics {
                self.namer
                    .name_cluster(condensation.members(c).iter().map(|&n| graph.module(n)))
            } else {
                None
            };
            let g = match token {
                Some(token) => *by_token.entry(token).or_insert_with(|| {
                    groups.push(Group {
                        token: Some(token),
                        height: 0,
                    });
                    groups.len() - 1
                }),
                None => {
                    groups.push(Group {
                        token: None,
                        height: 0,
                    });
                    groups.len() - 1
                }
            };
            groups[g].height = groups[g].height.max(heights[c]);
            group_of_cluster[c] = g;
        }

        let mut votes: BTreeMap<(usize, usize), u32> = BTreeMap::new();
        for edge in graph.edges() {
            let gs = group_of_cluster[condensation.cluster_of(edge.source)];
            let gt = group_of_cluster[condensation.cluster_of(edge.target)];
            if gs != gt {
                *votes.entry((gs, gt)).or_insert(0) += 1;
            }
        }
        let fallback: Vec<u32> = groups.iter().map(|g| g.height).collect();
        let levels = ordering::group_levels(groups.len(), &votes, &fallback)?;

        let group_names: Vec<(String, bool)> = groups
            .iter()
            .zip(&levels)
            .map(|(group, &level)| match group.token {
                Some(token) => (token.to_string(), false),
                None => {
                    let name = Layer::synthetic_name(level);
                    if by_token.contains_key(name.as_str()) {
                        (format!("{name}-unnamed"), true)
                    } else {
                        (name, true)
                    }
                }
            })
            .collect();

        let mut accs: BTreeMap<&str, LayerAcc> = BTreeMap::new();
        for node in graph.node_ids() {
            let g = group_of_cluster[condensation.cluster_of(node)];
            let (name, synthetic) = &group_names[g];
            let acc = accs.entry(name.as_str()).or_default();
            acc.level = levels[g];
            acc.synthetic = *synthetic;
            acc.modules.push(graph.module(node).id.clone());
        }

        let mut layers: Vec<Layer> = accs
            .into_iter()
            .map(|(name, acc)| Layer {
                name: name.to_string(),
                level: acc.level,
                allowed_dependencies: Vec::new(),
                modules: acc.modules,
                synthetic: acc.synthetic,
                external_facing: false,
            })
            .collect();
        layers.sort_by(|a, b| (a.level, &a.name).cmp(&(b.level, &b.name)));

        let position: BTreeMap<&str, usize> = layers
            .iter()
            .enumerate()
            .map(|(i, l)| (l.name.as_str(), i))
            .collect();
        let mut layer_of_node = Vec::with_capacity(graph.node_count());
        for node in graph.node_ids() {
            let (name, _) = &group_names[group_of_cluster[condensation.cluster_of(node)]];
            let idx = position
                .get(name.as_str())
                .copied()
                .ok_or_else(|| InferenceError::UnassignedModule {
                    module: graph.module(node).id.clone(),
                })?;
            layer_of_node.push(idx);
        }

        tracing::debug!(
            clusters = k,
            layers = layers.len(),
            max_level = layers.last().map(|l| l.level),
            "layers inferred"
        );

        Ok(LayerInference {
            condensation,
            layers,
            layer_of_node,
        })
    }
}
