//! ArchitecturePipeline: builder -> inference -> rules -> detector -> snapshot.

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use layerdrift_core::config::LayerDriftConfig;
use layerdrift_core::errors::PipelineResult;
use layerdrift_core::models::Snapshot;

use crate::drift::DriftDetector;
use crate::graph::{GraphBuild, GraphBuilder};
use crate::inference::LayerInferenceEngine;
use crate::rules::RulesEngine;

use super::assemble::{assemble, Assembly};
use super::input::AnalysisInput;

/// Runs complete analyses. Holds configuration only; every run builds its
/// own graph, layers and violations, so one pipeline can serve concurrent
/// runs.
#[derive(Debug, Clone, Default)]
pub struct ArchitecturePipeline {
    config: LayerDriftConfig,
}

impl ArchitecturePipeline {
    /// Validate `config` and build a pipeline around it.
    ///
    /// Configurations loaded with [`LayerDriftConfig::from_toml`] are already
    /// validated; this also covers ones assembled in code.
    pub fn new(config: LayerDriftConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayerDriftConfig {
        &self.config
    }

    /// Analyze one input, stamped with the current time.
    pub fn run(&self, input: &AnalysisInput) -> PipelineResult<Snapshot> {
        self.run_at(input, Utc::now())
    }

    /// Analyze one input with an explicit snapshot timestamp.
    ///
    /// Returns a complete snapshot or the reason the run failed. Recovered
    /// input problems (dropped edges, ignored overrides) are counted in the
    /// snapshot metadata.
    pub fn run_at(&self, input: &AnalysisInput, timestamp: DateTime<Utc>) -> PipelineResult<Snapshot> {
        let repository = input
            .repository
            .as_ref()
            .map_or("<unnamed>", |r| r.name.as_str());
        let span = tracing::info_span!("analysis", repository);
        let _guard = span.enter();

        let mut builder = GraphBuilder::new();
        builder.add_modules(&input.modules);
        builder.add_dependencies(input.dependencies.iter().cloned());
        let GraphBuild { graph, report } = builder.build(self.config.analysis.dangling_edges)?;

        let inference = LayerInferenceEngine::new(&self.config.inference).infer(&graph)?;
        let rules = RulesEngine::new(inference.layers(), &self.config.analysis);
        let outcome = DriftDetector::new(&graph, &inference, &rules, &self.config.analysis)
            .detected_at(timestamp)
            .detect();

        let snapshot = assemble(Assembly {
            repository: input.repository.clone(),
            timestamp,
            graph: &graph,
            report: &report,
            inference: &inference,
            rules: &rules,
            config: &self.config.analysis,
            outcome,
        })?;

        tracing::info!(
            snapshot = %snapshot.id(),
            modules = graph.node_count(),
            dependencies = graph.edge_count(),
            layers = snapshot.layers().len(),
            violations = snapshot.summary().total,
            filtered = snapshot.metadata().filtered_violations,
            dropped_edges = report.dropped.len(),
            "analysis complete"
        );
        Ok(snapshot)
    }

    /// Analyze independent inputs in parallel. Results keep input order.
    pub fn run_batch(&self, inputs: &[AnalysisInput]) -> Vec<PipelineResult<Snapshot>> {
        inputs.par_iter().map(|input| self.run(input)).collect()
    }
}
