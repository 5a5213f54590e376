//! The metric catalogue.
//!
//! Every metric is a plain function with the [`MetricFn`](crate::MetricFn)
//! signature. It reads what it needs through the [`MetricContext`], allocates
//! its own counters, and reports anything noteworthy into the diagnostics
//! sink it is handed. Metrics never see each other's results.

pub mod composition;
pub mod hierarchy;
pub mod properties;
pub mod richness;

use std::time::Duration;

use ontometrics_graph::GraphAccessor;

use crate::hierarchy::WalkBudget;
use crate::namespace::NamespaceClassifier;

/// Read-only inputs shared by every metric of one run.
#[derive(Clone, Copy)]
pub struct MetricContext<'a> {
    accessor: &'a dyn GraphAccessor,
    classifier: &'a NamespaceClassifier,
    max_paths: usize,
    timeout: Option<Duration>,
}

impl<'a> MetricContext<'a> {
    /// A context without walk limits.
    #[must_use]
    pub fn new(accessor: &'a dyn GraphAccessor, classifier: &'a NamespaceClassifier) -> Self {
        Self {
            accessor,
            classifier,
            max_paths: usize::MAX,
            timeout: None,
        }
    }

    /// Bounds each path enumeration to `max_paths` paths and `timeout`.
    #[must_use]
    pub fn with_walk_limits(mut self, max_paths: usize, timeout: Duration) -> Self {
        self.max_paths = max_paths;
        self.timeout = Some(timeout);
        self
    }

    /// The graph being measured.
    #[must_use]
    pub fn accessor(&self) -> &'a dyn GraphAccessor {
        self.accessor
    }

    /// The namespace classifier for this run.
    #[must_use]
    pub fn classifier(&self) -> &'a NamespaceClassifier {
        self.classifier
    }

    /// A fresh budget whose deadline starts now.
    #[must_use]
    pub fn budget(&self) -> WalkBudget {
        match self.timeout {
            Some(timeout) => WalkBudget::new(self.max_paths, timeout),
            None if self.max_paths == usize::MAX => WalkBudget::unbounded(),
            None => WalkBudget::new(self.max_paths, Duration::MAX),
        }
    }
}
