//! Error taxonomy for a metrics run.
//!
//! Undefined metrics and malformed hierarchies are *not* errors: they are
//! reported through [`MetricValue::Undefined`](crate::MetricValue) and
//! [`Diagnostic`](crate::Diagnostic) respectively. Only conditions that make
//! the whole run untrustworthy surface here.

use std::fmt;
use std::path::PathBuf;

use ontometrics_graph::AccessorError;
use serde::Serialize;

use crate::registry::MetricName;

/// Errors that can occur while loading or validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("config parse error in {path}: {message}")]
    ParseError {
        /// File path, or `<string>` for in-memory input.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A value parsed but is out of range.
    #[error("config validation failed for {field}: {message}")]
    ValidationFailed {
        /// Dotted field name, e.g. `walk.max_paths`.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The config file could not be read.
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// One metric whose accessor query failed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedQuery {
    /// The metric that issued the query.
    pub metric: MetricName,
    /// Name of the failing accessor query, or `unknown`.
    pub query: String,
    /// Accessor error message.
    pub message: String,
}

impl FailedQuery {
    pub(crate) fn new(metric: MetricName, error: &AccessorError) -> Self {
        Self {
            metric,
            query: error.query().unwrap_or("unknown").to_string(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for FailedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.metric, self.query, self.message)
    }
}

/// Errors that abort a metrics run.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// The accessor failed before any metric ran (e.g. base namespace lookup).
    #[error(transparent)]
    Accessor(#[from] AccessorError),

    /// One or more metrics hit an accessor failure; no result can be trusted.
    #[error("run aborted, accessor queries failed: {}", join_failures(.0))]
    AccessorFailures(Vec<FailedQuery>),

    /// The engine configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A metric code did not resolve to a registered metric.
    #[error("unknown metric `{0}`")]
    UnknownMetric(String),

    /// The worker pool could not be created.
    #[error("cannot build worker pool: {0}")]
    ThreadPool(String),
}

fn join_failures(failures: &[FailedQuery]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MetricsError {
    /// The failed queries when this is an [`MetricsError::AccessorFailures`].
    #[must_use]
    pub fn failed_queries(&self) -> &[FailedQuery] {
        match self {
            MetricsError::AccessorFailures(failures) => failures,
            _ => &[],
        }
    }
}
