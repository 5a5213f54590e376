//! Namespace composition metrics: how much an ontology draws on external
//! vocabularies, and how evenly.

use ontometrics_graph::AccessorError;

use super::MetricContext;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::namespace::UsageTally;
use crate::report::{MetricValue, UndefinedReason};

type MetricResult = Result<MetricValue, AccessorError>;

fn tally(ctx: &MetricContext<'_>, diagnostics: &mut Diagnostics) -> Result<UsageTally, AccessorError> {
    if ctx.classifier().base().is_none() {
        diagnostics.warn(
            DiagnosticKind::MissingBaseNamespace,
            "ontology has no base namespace; no resource is counted as internal",
        );
    }
    UsageTally::collect(ctx.accessor(), ctx.classifier())
}

/// CP: external resource usages over internal plus external usages.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn composability(ctx: &MetricContext<'_>, diagnostics: &mut Diagnostics) -> MetricResult {
    let usage = tally(ctx, diagnostics)?;
    Ok(MetricValue::ratio(
        usage.external as f64,
        (usage.internal + usage.external) as f64,
        UndefinedReason::ZeroDenominator,
    ))
}

/// AG: the largest external namespace's share of external usage divided by
/// the smallest one's.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn aggregability(ctx: &MetricContext<'_>, diagnostics: &mut Diagnostics) -> MetricResult {
    let usage = tally(ctx, diagnostics)?;
    let counts: Vec<u64> = usage
        .per_namespace
        .values()
        .copied()
        .filter(|&n| n > 0)
        .collect();
    let (Some(&max), Some(&min)) = (counts.iter().max(), counts.iter().min()) else {
        return Ok(MetricValue::Undefined(UndefinedReason::TooFewExternalNamespaces));
    };
    if counts.len() < 2 {
        return Ok(MetricValue::Undefined(UndefinedReason::TooFewExternalNamespaces));
    }
    let total: u64 = counts.iter().sum();
    Ok(MetricValue::ratio(
        max as f64 / total as f64,
        min as f64 / total as f64,
        UndefinedReason::TooFewExternalNamespaces,
    ))
}
