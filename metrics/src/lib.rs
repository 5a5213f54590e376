//! Structural quality metrics for OWL ontologies.
//!
//! The `ontometrics` crate computes a catalogue of hierarchy, property,
//! richness and namespace-composition metrics over any graph exposed through
//! [`GraphAccessor`](ontometrics_graph::GraphAccessor). Each metric is a pure
//! function of the graph; the [`MetricEngine`] runs a selection of them in
//! parallel and collects the results into a [`MetricsReport`].
//!
//! A metric whose denominator vanishes is [`MetricValue::Undefined`], never a
//! NaN and never an error. Cycles in the subclass hierarchy are reported as
//! [`Diagnostic`]s. Only accessor failures abort a run.
//!
//! # Entry Point
//!
//! ```
//! use ontometrics::{EngineConfig, MetricEngine, MetricName, MetricValue};
//! use ontometrics_graph::turtle;
//!
//! let store = turtle::load_turtle(ontometrics::tests::fixtures::ZOO)?;
//! let engine = MetricEngine::new(EngineConfig::default())?;
//! let report = engine.run(&store)?;
//! assert_eq!(report.value(MetricName::Tm), Some(MetricValue::Defined(2.0)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`catalogue`]: the metric functions, grouped by family
//! - [`hierarchy`]: subsumption snapshot and root-to-leaf path enumeration
//! - [`namespace`]: namespace classification and resource-usage tallies
//! - [`registry`]: metric identifiers and the name-to-function registry
//! - [`engine`]: parallel evaluation of a metric selection
//! - [`report`]: metric values, outcomes and reports
//! - [`diagnostics`]: the per-metric diagnostics sink
//! - [`config`]: TOML engine configuration
//! - [`error`]: configuration and run errors
//! - [`tests`]: Turtle fixtures

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod catalogue;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod namespace;
pub mod registry;
pub mod report;
pub mod tests;

pub use catalogue::MetricContext;
pub use config::{CliOverrides, EngineConfig, NamespaceConfig, WalkConfig};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use engine::{run_metrics, MetricEngine};
pub use error::{ConfigError, FailedQuery, MetricsError};
pub use hierarchy::{BudgetExceeded, Hierarchy, PathSet, PathStats, WalkBudget};
pub use namespace::{NamespaceClass, NamespaceClassifier, UsageTally};
pub use registry::{MetricFn, MetricName, MetricRegistry};
pub use report::{MetricOutcome, MetricValue, MetricsReport, UndefinedReason};
