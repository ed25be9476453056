//! DriftDetector: one pass over the edges, at most one violation per edge.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use smallvec::{smallvec, SmallVec};

use layerdrift_core::config::AnalysisConfig;
use layerdrift_core::models::{Layer, Module, Severity, Violation, ViolationType};
use layerdrift_core::types::collections::FxHashMap;
use layerdrift_core::NodeId;

use crate::graph::{DependencyGraph, Edge};
use crate::inference::LayerInference;
use crate::rules::{DenialReason, RuleDecision, RulesEngine};

use super::severity::layer_violation_severity;

/// Detection results before any severity threshold is applied.
#[derive(Debug, Clone, Default)]
pub struct DetectionOutcome {
    /// In graph edge order.
    pub violations: Vec<Violation>,
    /// Violation type produced by each graph edge, indexed like
    /// [`DependencyGraph::edges`].
    pub edge_types: Vec<Option<ViolationType>>,
}

impl DetectionOutcome {
    pub fn count_by_type(&self) -> BTreeMap<ViolationType, usize> {
        let mut counts = BTreeMap::new();
        for v in &self.violations {
            *counts.entry(v.violation_type).or_insert(0) += 1;
        }
        counts
    }
}

/// Classifies dependencies in priority order: circular, layer, legacy,
/// gateway. Each category can be switched off in [`AnalysisConfig`]; a
/// disabled category lets the edge fall through to the next check.
///
/// Reads the graph and inference results only. Nothing is mutated.
pub struct DriftDetector<'a> {
    graph: &'a DependencyGraph,
    inference: &'a LayerInference,
    rules: &'a RulesEngine,
    config: &'a AnalysisConfig,
    detected_at: DateTime<Utc>,
}

impl<'a> DriftDetector<'a> {
    pub fn new(
        graph: &'a DependencyGraph,
        inference: &'a LayerInference,
        rules: &'a RulesEngine,
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            graph,
            inference,
            rules,
            config,
            detected_at: Utc::now(),
        }
    }

    /// Stamp violations with `at` instead of the current time.
    pub fn detected_at(mut self, at: DateTime<Utc>) -> Self {
        self.detected_at = at;
        self
    }

    pub fn detect(&self) -> DetectionOutcome {
        let mut outcome = DetectionOutcome {
            violations: Vec::new(),
            edge_types: Vec::with_capacity(self.graph.edge_count()),
        };
        for edge in self.graph.edges() {
            let violation = self.classify(&edge);
            outcome.edge_types.push(violation.as_ref().map(|v| v.violation_type));
            outcome.violations.extend(violation);
        }
        tracing::debug!(
            edges = self.graph.edge_count(),
            violations = outcome.violations.len(),
            "drift detection complete"
        );
        outcome
    }

    /// Classify a single edge of the graph.
    pub fn classify(&self, edge: &Edge) -> Option<Violation> {
        let ctx = EdgeContext {
            edge,
            source: self.graph.module(edge.source),
            target: self.graph.module(edge.target),
            source_layer: self.inference.layer_of(edge.source),
            target_layer: self.inference.layer_of(edge.target),
        };

        if self.config.detect_circular_dependencies && self.inference.same_cluster(edge.source, edge.target) {
            return Some(self.circular(&ctx));
        }
        if self.config.detect_layer_violations {
            if let RuleDecision::Denied(reason) = self.rules.decide(&ctx.source_layer.name, &ctx.target_layer.name) {
                return Some(self.layer_violation(&ctx, &reason));
            }
        }
        if self.config.detect_legacy_access && ctx.target.is_legacy() && !ctx.source.is_legacy() {
            return Some(self.legacy_access(&ctx));
        }
        if self.config.detect_gateway_bypass
            && self.config.is_external_facing(&ctx.target_layer.name)
            && ctx.source_layer.name != ctx.target_layer.name
            && !ctx.source.is_gateway()
            && !ctx.target.is_gateway()
        {
            return Some(self.gateway_bypass(&ctx));
        }
        None
    }

    fn circular(&self, ctx: &EdgeContext<'_>) -> Violation {
        let (source, target) = (ctx.source, ctx.target);
        let escalate = source.is_gateway()
            || target.is_gateway()
            || self.config.is_critical_path(&source.id)
            || self.config.is_critical_path(&target.id);
        let mut severity = Severity::High;
        if escalate {
            severity = severity.escalate();
        }
        let cycle_len = self.inference.cluster_members(ctx.edge.source).len();
        let path = self.cycle_path(ctx.edge.source, ctx.edge.target);

        self.violation(
            ViolationType::CircularDependency,
            severity,
            ctx,
            format!("Circular dependency between {} and {}", source.label, target.label),
            format!(
                "{} depends on {}, which is part of a dependency cycle of {} modules: {}",
                source.id,
                target.id,
                cycle_len,
                path.join(" -> ")
            ),
            path,
            "acyclic_dependencies".to_string(),
            "Dependencies must not form cycles".to_string(),
        )
    }

    fn layer_violation(&self, ctx: &EdgeContext<'_>, reason: &DenialReason) -> Violation {
        let (sl, tl) = (ctx.source_layer, ctx.target_layer);
        let severity = layer_violation_severity(sl.level, tl.level);
        self.violation(
            ViolationType::LayerViolation,
            severity,
            ctx,
            format!("Layer violation: {} -> {}", sl.name, tl.name),
            format!(
                "{} in layer {} (level {}) depends on {} in layer {} (level {}): {}",
                ctx.source.id,
                sl.name,
                sl.level,
                ctx.target.id,
                tl.name,
                tl.level,
                reason.describe()
            ),
            smallvec![ctx.source.id.clone(), ctx.target.id.clone()],
            format!("{}_to_{}_forbidden", sl.name, tl.name),
            format!("{} layer must not depend on {} layer", sl.name, tl.name),
        )
    }

    fn legacy_access(&self, ctx: &EdgeContext<'_>) -> Violation {
        self.violation(
            ViolationType::LegacyAccess,
            Severity::Medium,
            ctx,
            format!("Direct legacy access: {}", ctx.target.label),
            format!(
                "{} depends directly on legacy module {}",
                ctx.source.id, ctx.target.id
            ),
            smallvec![ctx.source.id.clone(), ctx.target.id.clone()],
            "legacy_isolation".to_string(),
            "Legacy modules must only be reached from other legacy modules".to_string(),
        )
    }

    fn gateway_bypass(&self, ctx: &EdgeContext<'_>) -> Violation {
        self.violation(
            ViolationType::GatewayBypass,
            Severity::High,
            ctx,
            format!("Gateway bypass: {} -> {}", ctx.source.label, ctx.target.label),
            format!(
                "{} reaches {} in external-facing layer {} without going through a gateway module",
                ctx.source.id, ctx.target.id, ctx.target_layer.name
            ),
            smallvec![ctx.source.id.clone(), ctx.target.id.clone()],
            "gateway_enforcement".to_string(),
            format!("{} layer must be reached through a gateway", ctx.target_layer.name),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn violation(
        &self,
        violation_type: ViolationType,
        severity: Severity,
        ctx: &EdgeContext<'_>,
        title: String,
        description: String,
        dependency_path: SmallVec<[String; 2]>,
        rule_name: String,
        pattern_broken: String,
    ) -> Violation {
        Violation {
            id: Violation::make_id(violation_type, &ctx.source.id, &ctx.target.id),
            violation_type,
            severity,
            source_module: ctx.source.id.clone(),
            target_module: ctx.target.id.clone(),
            title,
            description,
            dependency_path,
            rule_name,
            pattern_broken,
            detected_at: self.detected_at,
        }
    }

    /// Shortest cycle through the edge `source -> target`: the edge itself
    /// followed by the shortest way back from `target` to `source` inside
    /// their cluster.
    fn cycle_path(&self, source: NodeId, target: NodeId) -> SmallVec<[String; 2]> {
        let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut queue = VecDeque::from([target]);
        parent.insert(target, target);
        while let Some(node) = queue.pop_front() {
            if node == source {
                break;
            }
            for next in self.graph.successors(node) {
                if !self.inference.same_cluster(next, source) || parent.contains_key(&next) {
                    continue;
                }
                parent.insert(next, node);
                queue.push_back(next);
            }
        }

        let mut back = vec![source];
        let mut node = source;
        while node != target {
            match parent.get(&node) {
                Some(&p) => {
                    back.push(p);
                    node = p;
                }
                None => break,
            }
        }
        back.reverse();

        let mut path: SmallVec<[String; 2]> = smallvec![self.graph.module(source).id.clone()];
        path.extend(back.into_iter().map(|n| self.graph.module(n).id.clone()));
        path
    }
}

struct EdgeContext<'e> {
    edge: &'e Edge,
    source: &'e Module,
    target: &'e Module,
    source_layer: &'e Layer,
    target_layer: &'e Layer,
}
