//! The metric engine: evaluates a selection of metrics over one graph.
//!
//! Metrics are independent, so each one runs as its own task on a dedicated
//! rayon pool. They share the accessor and the namespace classifier by
//! reference and nothing else. An undefined metric never affects the others;
//! an accessor failure in any metric aborts the run once every task has
//! finished, listing each failed query.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use ontometrics_graph::{AccessorError, GraphAccessor};
use rayon::prelude::*;

use crate::catalogue::MetricContext;
use crate::config::EngineConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{FailedQuery, MetricsError};
use crate::namespace::NamespaceClassifier;
use crate::registry::{MetricFn, MetricName, MetricRegistry};
use crate::report::{MetricOutcome, MetricValue, MetricsReport};

/// Runs metrics according to an [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct MetricEngine {
    config: EngineConfig,
    registry: MetricRegistry,
}

impl MetricEngine {
    /// Creates an engine over the standard registry.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Config`] if `config` does not validate.
    pub fn new(config: EngineConfig) -> Result<Self, MetricsError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: MetricRegistry::standard(),
        })
    }

    /// Replaces the metric registry.
    #[must_use]
    pub fn with_registry(mut self, registry: MetricRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The metric registry.
    #[must_use]
    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Runs the configured metric selection.
    ///
    /// # Errors
    ///
    /// See [`MetricEngine::run_selection`].
    pub fn run(&self, accessor: &dyn GraphAccessor) -> Result<MetricsReport, MetricsError> {
        let selection = self.config.selected_metrics()?;
        self.run_selection(accessor, &selection)
    }

    /// Runs `selection`, ignoring the configured metric list.
    ///
    /// # Errors
    ///
    /// - [`MetricsError::UnknownMetric`] if a selected metric is not registered.
    /// - [`MetricsError::Accessor`] if the base namespace cannot be queried.
    /// - [`MetricsError::ThreadPool`] if the worker pool cannot be built.
    /// - [`MetricsError::AccessorFailures`] if any metric's query failed.
    pub fn run_selection(
        &self,
        accessor: &dyn GraphAccessor,
        selection: &[MetricName],
    ) -> Result<MetricsReport, MetricsError> {
        let tasks = self.resolve(selection)?;
        let classifier = self.classifier(accessor)?;
        let ctx = MetricContext::new(accessor, &classifier)
            .with_walk_limits(self.config.walk.max_paths, self.config.walk.timeout());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .thread_name(|i| format!("ontometrics-{i}"))
            .build()
            .map_err(|e| MetricsError::ThreadPool(e.to_string()))?;

        let started = Instant::now();
        tracing::info!(
            metrics = tasks.len(),
            threads = pool.current_num_threads(),
            base = classifier.base().unwrap_or("<none>"),
            "metrics run started"
        );

        let results: Vec<(MetricName, Result<MetricOutcome, AccessorError>)> = pool.install(|| {
            tasks
                .par_iter()
                .map(|&(name, metric)| (name, evaluate(name, metric, &ctx)))
                .collect()
        });

        let mut report = MetricsReport::new();
        let mut failures = Vec::new();
        for (name, result) in results {
            match result {
                Ok(outcome) => report.push(outcome),
                Err(e) => {
                    tracing::warn!(metric = %name, error = %e, "accessor query failed");
                    failures.push(FailedQuery::new(name, &e));
                }
            }
        }
        if !failures.is_empty() {
            return Err(MetricsError::AccessorFailures(failures));
        }

        tracing::info!(
            defined = report.defined_count(),
            undefined = report.undefined_count(),
            diagnostics = report.diagnostic_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "metrics run finished"
        );
        Ok(report)
    }

    fn resolve(&self, selection: &[MetricName]) -> Result<Vec<(MetricName, MetricFn)>, MetricsError> {
        let unique: BTreeSet<MetricName> = selection.iter().copied().collect();
        unique
            .into_iter()
            .map(|name| {
                self.registry
                    .get(name)
                    .map(|metric| (name, metric))
                    .ok_or_else(|| MetricsError::UnknownMetric(name.code().to_string()))
            })
            .collect()
    }

    fn classifier(&self, accessor: &dyn GraphAccessor) -> Result<NamespaceClassifier, MetricsError> {
        let base = match self.config.namespaces.base {
            Some(ref base) => Some(base.clone()),
            None => accessor.base_namespace()?,
        };
        Ok(NamespaceClassifier::new(base)
            .with_extra_defaults(self.config.namespaces.extra_default.iter().cloned()))
    }
}

fn evaluate(
    name: MetricName,
    metric: MetricFn,
    ctx: &MetricContext<'_>,
) -> Result<MetricOutcome, AccessorError> {
    let _span = tracing::debug_span!("metric", metric = %name).entered();
    let started = Instant::now();
    tracing::debug!("metric started");
    let mut diagnostics = Diagnostics::new();
    let value = metric(ctx, &mut diagnostics)?;
    let elapsed = started.elapsed();
    tracing::debug!(
        %value,
        diagnostics = diagnostics.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "metric finished"
    );
    Ok(MetricOutcome {
        metric: name,
        value,
        diagnostics: diagnostics.into_vec(),
        elapsed,
    })
}

/// Runs `selection` with the default configuration and returns the plain
/// `metric -> value` mapping.
///
/// # Errors
///
/// See [`MetricEngine::run_selection`].
pub fn run_metrics(
    accessor: &dyn GraphAccessor,
    selection: &BTreeSet<MetricName>,
) -> Result<BTreeMap<MetricName, MetricValue>, MetricsError> {
    let selection: Vec<MetricName> = selection.iter().copied().collect();
    let report = MetricEngine::new(EngineConfig::default())?.run_selection(accessor, &selection)?;
    Ok(report.to_values())
}
