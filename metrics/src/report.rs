//! Metric report types: values, per-metric outcomes, and report aggregation.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::diagnostics::Diagnostic;
use crate::registry::MetricName;

/// Why a metric has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// The ontology has no named concepts.
    NoConcepts,
    /// No concept is a leaf.
    NoLeaves,
    /// No root-to-leaf path exists.
    NoPaths,
    /// No concept has more than one direct parent.
    NoMultiParentConcepts,
    /// The metric's denominator is zero or negative.
    ZeroDenominator,
    /// Fewer than two external namespaces are used.
    TooFewExternalNamespaces,
    /// Path enumeration exceeded its budget.
    BudgetExceeded,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UndefinedReason::NoConcepts => "no concepts",
            UndefinedReason::NoLeaves => "no leaf concepts",
            UndefinedReason::NoPaths => "no root-to-leaf paths",
            UndefinedReason::NoMultiParentConcepts => "no multi-parent concepts",
            UndefinedReason::ZeroDenominator => "zero denominator",
            UndefinedReason::TooFewExternalNamespaces => "fewer than two external namespaces",
            UndefinedReason::BudgetExceeded => "path budget exceeded",
        })
    }
}

/// The scalar result of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    /// A finite value.
    Defined(f64),
    /// No meaningful value exists.
    Undefined(UndefinedReason),
}

impl MetricValue {
    /// `numerator / denominator`, or `Undefined(reason)` when the
    /// denominator is not positive or the quotient is not finite.
    #[must_use]
    pub fn ratio(numerator: f64, denominator: f64, reason: UndefinedReason) -> Self {
        if denominator <= 0.0 || denominator.is_nan() {
            return MetricValue::Undefined(reason);
        }
        let value = numerator / denominator;
        if value.is_finite() {
            MetricValue::Defined(value)
        } else {
            MetricValue::Undefined(reason)
        }
    }

    /// Integer-count convenience for [`MetricValue::ratio`].
    #[must_use]
    pub fn count_ratio(numerator: usize, denominator: usize, reason: UndefinedReason) -> Self {
        Self::ratio(numerator as f64, denominator as f64, reason)
    }

    /// The value, if defined.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Defined(v) => Some(*v),
            MetricValue::Undefined(_) => None,
        }
    }

    /// Returns true for [`MetricValue::Defined`].
    #[must_use]
    pub fn is_defined(&self) -> bool {
        matches!(self, MetricValue::Defined(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Defined(v) => write!(f, "{v:.4}"),
            MetricValue::Undefined(reason) => write!(f, "undefined ({reason})"),
        }
    }
}

/// The outcome of evaluating one metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricOutcome {
    /// Which metric.
    pub metric: MetricName,
    /// Its value.
    pub value: MetricValue,
    /// Diagnostics recorded while computing it.
    pub diagnostics: Vec<Diagnostic>,
    /// Wall-clock time spent.
    #[serde(serialize_with = "serialize_millis", rename = "elapsed_ms")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_micros() as f64 / 1000.0)
}

/// Aggregated results of a metrics run, keyed and ordered by metric.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsReport {
    /// One outcome per evaluated metric.
    pub results: BTreeMap<MetricName, MetricOutcome>,
}

impl MetricsReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the outcome of one metric.
    pub fn push(&mut self, outcome: MetricOutcome) {
        self.results.insert(outcome.metric, outcome);
    }

    /// The value of `metric`, if it was evaluated.
    #[must_use]
    pub fn value(&self, metric: MetricName) -> Option<MetricValue> {
        self.results.get(&metric).map(|o| o.value)
    }

    /// Number of evaluated metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no metric was evaluated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the count of defined metrics.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.results.values().filter(|o| o.value.is_defined()).count()
    }

    /// Returns the count of undefined metrics.
    #[must_use]
    pub fn undefined_count(&self) -> usize {
        self.len() - self.defined_count()
    }

    /// Returns the total number of diagnostics across all metrics.
    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.results.values().map(|o| o.diagnostics.len()).sum()
    }

    /// The plain `metric -> value` mapping.
    #[must_use]
    pub fn to_values(&self) -> BTreeMap<MetricName, MetricValue> {
        self.results
            .iter()
            .map(|(name, outcome)| (*name, outcome.value))
            .collect()
    }

    /// Pretty-printed JSON rendering of the report.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticKind, Severity};

    fn outcome(metric: MetricName, value: MetricValue, diagnostics: usize) -> MetricOutcome {
        MetricOutcome {
            metric,
            value,
            diagnostics: (0..diagnostics)
                .map(|i| Diagnostic {
                    severity: Severity::Warning,
                    kind: DiagnosticKind::MalformedHierarchy,
                    message: format!("cycle {i}"),
                })
                .collect(),
            elapsed: Duration::from_millis(3),
        }
    }

    #[test]
    fn ratio_rejects_zero_and_non_finite() {
        assert_eq!(
            MetricValue::ratio(1.0, 0.0, UndefinedReason::NoConcepts),
            MetricValue::Undefined(UndefinedReason::NoConcepts)
        );
        assert_eq!(
            MetricValue::ratio(1.0, -2.0, UndefinedReason::ZeroDenominator),
            MetricValue::Undefined(UndefinedReason::ZeroDenominator)
        );
        assert_eq!(
            MetricValue::ratio(f64::NAN, 2.0, UndefinedReason::ZeroDenominator),
            MetricValue::Undefined(UndefinedReason::ZeroDenominator)
        );
        assert_eq!(
            MetricValue::count_ratio(3, 2, UndefinedReason::ZeroDenominator),
            MetricValue::Defined(1.5)
        );
    }

    #[test]
    fn report_counts() {
        let mut report = MetricsReport::new();
        report.push(outcome(MetricName::Dit, MetricValue::Defined(4.0), 2));
        report.push(outcome(
            MetricName::Tm,
            MetricValue::Undefined(UndefinedReason::NoMultiParentConcepts),
            0,
        ));
        report.push(outcome(MetricName::Cp, MetricValue::Defined(0.25), 1));
        assert_eq!(report.len(), 3);
        assert_eq!(report.defined_count(), 2);
        assert_eq!(report.undefined_count(), 1);
        assert_eq!(report.diagnostic_count(), 3);
        assert_eq!(report.value(MetricName::Dit), Some(MetricValue::Defined(4.0)));
        assert_eq!(report.value(MetricName::Ag), None);
        let keys: Vec<_> = report.to_values().into_keys().collect();
        assert_eq!(keys, vec![MetricName::Dit, MetricName::Tm, MetricName::Cp]);
    }

    #[test]
    fn json_shape() {
        let mut report = MetricsReport::new();
        report.push(outcome(
            MetricName::Ag,
            MetricValue::Undefined(UndefinedReason::TooFewExternalNamespaces),
            0,
        ));
        let json: serde_json::Value =
            serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        let ag = &json["results"]["AG"];
        assert_eq!(ag["value"]["status"], "undefined");
        assert_eq!(ag["value"]["value"], "too_few_external_namespaces");
        assert_eq!(ag["elapsed_ms"], 3.0);
    }
}
