//! Per-metric diagnostics sink.
//!
//! Each metric receives its own [`Diagnostics`] and appends to it; nothing is
//! shared between metrics. Every recorded diagnostic is also emitted as a
//! `tracing` event so it shows up in logs, but the sink is the channel the
//! report is built from.

use std::collections::HashSet;
use std::fmt;

use ontometrics_graph::Concept;
use serde::Serialize;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, the result is still exact.
    Info,
    /// The result is defined but computed on a truncated or degraded input,
    /// or is undefined because of the condition described.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A subsumption cycle was found; the cyclic branch was truncated.
    MalformedHierarchy,
    /// Concepts exist but none of them is a root.
    MissingRoot,
    /// Path enumeration stopped at its size or time budget.
    BudgetExceeded,
    /// The ontology has no base namespace, so nothing is internal.
    MissingBaseNamespace,
}

/// A single diagnostic attached to a metric outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    /// Severity of the diagnostic.
    pub severity: Severity,
    /// Category.
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Append-only collection of diagnostics for one metric evaluation.
///
/// Identical diagnostics are recorded once, so a cycle edge reached along
/// many paths is reported a single time.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    seen: HashSet<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic unless an identical one is already present.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if !self.seen.insert(diagnostic.clone()) {
            return;
        }
        match diagnostic.severity {
            Severity::Info => tracing::info!(kind = ?diagnostic.kind, "{}", diagnostic.message),
            Severity::Warning => {
                tracing::warn!(kind = ?diagnostic.kind, "{}", diagnostic.message)
            }
        }
        self.entries.push(diagnostic);
    }

    /// Records an informational diagnostic.
    pub fn info(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Info,
            kind,
            message: message.into(),
        });
    }

    /// Records a warning.
    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            message: message.into(),
        });
    }

    /// Records the edge `parent -> child` whose child is already on the
    /// current path, or a concept asserted as its own subclass when `parent`
    /// and `child` are the same.
    pub fn cycle_edge(&mut self, parent: &Concept, child: &Concept) {
        self.warn(
            DiagnosticKind::MalformedHierarchy,
            format!(
                "subsumption cycle: <{}> reached again from <{}>; branch truncated",
                child.iri, parent.iri
            ),
        );
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates recorded diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Returns true if any diagnostic of `kind` was recorded.
    #[must_use]
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    /// Consumes the sink, returning diagnostics in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
