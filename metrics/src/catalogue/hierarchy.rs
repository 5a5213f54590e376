//! Metrics over the subsumption hierarchy: depth, path statistics, coupling,
//! fan-in/fan-out and tangledness.

use ontometrics_graph::AccessorError;

use super::MetricContext;
use crate::diagnostics::Diagnostics;
use crate::hierarchy::{Hierarchy, PathStats};
use crate::report::{MetricValue, UndefinedReason};

type MetricResult = Result<MetricValue, AccessorError>;

/// Runs `measure` over the root-to-leaf path statistics, or returns the
/// budget outcome.
fn with_paths(
    ctx: &MetricContext<'_>,
    diagnostics: &mut Diagnostics,
    measure: impl FnOnce(&Hierarchy, PathStats) -> MetricValue,
) -> MetricResult {
    let hierarchy = Hierarchy::load(ctx.accessor())?;
    match hierarchy.path_stats(&ctx.budget(), diagnostics) {
        Ok(stats) => Ok(measure(&hierarchy, stats)),
        Err(exceeded) => Ok(exceeded.into()),
    }
}

/// DIT: the longest root-to-leaf path, counted in concepts.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn depth(ctx: &MetricContext<'_>, diagnostics: &mut Diagnostics) -> MetricResult {
    with_paths(ctx, diagnostics, |_, paths| {
        paths.longest.map_or(
            MetricValue::Undefined(UndefinedReason::NoPaths),
            |n| MetricValue::Defined(n as f64),
        )
    })
}

/// LCOM: mean root-to-leaf path length.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn mean_path_length(ctx: &MetricContext<'_>, diagnostics: &mut Diagnostics) -> MetricResult {
    with_paths(ctx, diagnostics, |_, paths| {
        MetricValue::count_ratio(paths.total_length, paths.count, UndefinedReason::NoPaths)
    })
}

/// WMC: root-to-leaf paths per leaf concept.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn paths_per_leaf(ctx: &MetricContext<'_>, diagnostics: &mut Diagnostics) -> MetricResult {
    with_paths(ctx, diagnostics, |hierarchy, paths| {
        MetricValue::count_ratio(
            paths.count,
            hierarchy.leaf_concepts().len(),
            UndefinedReason::NoLeaves,
        )
    })
}

/// CBO: direct parents per non-root concept.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn coupling(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let hierarchy = Hierarchy::load(ctx.accessor())?;
    let parents: usize = hierarchy.parent_counts().sum();
    let non_roots = hierarchy.len() - hierarchy.root_concepts().len().min(hierarchy.len());
    Ok(MetricValue::count_ratio(
        parents,
        non_roots,
        UndefinedReason::ZeroDenominator,
    ))
}

/// NAC: direct parents per leaf concept.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn ancestors_per_leaf(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let hierarchy = Hierarchy::load(ctx.accessor())?;
    Ok(MetricValue::count_ratio(
        hierarchy.leaf_parent_total(),
        hierarchy.leaf_concepts().len(),
        UndefinedReason::NoLeaves,
    ))
}

/// NOC: direct children per non-leaf concept.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn children_per_concept(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let hierarchy = Hierarchy::load(ctx.accessor())?;
    let inner = hierarchy.len() - hierarchy.leaf_concepts().len();
    Ok(MetricValue::count_ratio(
        hierarchy.edge_count(),
        inner,
        UndefinedReason::ZeroDenominator,
    ))
}

/// TM: mean parent count over concepts with more than one direct parent.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn tangledness(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let hierarchy = Hierarchy::load(ctx.accessor())?;
    let (tangled, parents) = hierarchy
        .parent_counts()
        .filter(|&n| n > 1)
        .fold((0usize, 0usize), |(count, sum), n| (count + 1, sum + n));
    Ok(MetricValue::count_ratio(
        parents,
        tangled,
        UndefinedReason::NoMultiParentConcepts,
    ))
}

/// INR: direct subclass edges per concept.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn relationships_per_concept(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let hierarchy = Hierarchy::load(ctx.accessor())?;
    Ok(MetricValue::count_ratio(
        hierarchy.edge_count(),
        hierarchy.len(),
        UndefinedReason::NoConcepts,
    ))
}
