//! Property-centred metrics: declared properties per concept and the
//! relationship/property richness ratios.

use std::collections::HashSet;

use ontometrics_graph::{AccessorError, AccessorResult, GraphAccessor, Node, Property};

use super::MetricContext;
use crate::diagnostics::Diagnostics;
use crate::hierarchy::Hierarchy;
use crate::report::{MetricValue, UndefinedReason};

type MetricResult = Result<MetricValue, AccessorError>;

fn declared_total(accessor: &dyn GraphAccessor, hierarchy: &Hierarchy) -> AccessorResult<usize> {
    hierarchy
        .all_named_concepts()
        .iter()
        .try_fold(0usize, |sum, concept| -> AccessorResult<usize> {
            Ok(sum + accessor.declared_properties(concept, true)?.len())
        })
}

/// `subclass edges + object properties + datatype properties`.
fn relationship_total(
    accessor: &dyn GraphAccessor,
    hierarchy: &Hierarchy,
) -> AccessorResult<usize> {
    Ok(hierarchy.edge_count()
        + accessor.list_object_properties()?.len()
        + accessor.list_datatype_properties()?.len())
}

/// NOM: directly declared properties per concept.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn properties_per_concept(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let accessor = ctx.accessor();
    let hierarchy = Hierarchy::load(accessor)?;
    Ok(MetricValue::count_ratio(
        declared_total(accessor, &hierarchy)?,
        hierarchy.len(),
        UndefinedReason::NoConcepts,
    ))
}

/// RFC: declared properties plus direct parents, per concept.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn response_for_concept(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let accessor = ctx.accessor();
    let hierarchy = Hierarchy::load(accessor)?;
    let parents: usize = hierarchy.parent_counts().sum();
    Ok(MetricValue::count_ratio(
        declared_total(accessor, &hierarchy)? + parents,
        hierarchy.len(),
        UndefinedReason::NoConcepts,
    ))
}

/// RR: share of subclass edges among all relationships.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn relationship_richness(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let accessor = ctx.accessor();
    let hierarchy = Hierarchy::load(accessor)?;
    Ok(MetricValue::count_ratio(
        hierarchy.edge_count(),
        relationship_total(accessor, &hierarchy)?,
        UndefinedReason::ZeroDenominator,
    ))
}

/// PR: property usages inside concept and individual axioms, relative to
/// all relationships.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn properties_richness(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let accessor = ctx.accessor();
    let hierarchy = Hierarchy::load(accessor)?;
    Ok(MetricValue::count_ratio(
        property_usages(accessor, &hierarchy)?,
        relationship_total(accessor, &hierarchy)?,
        UndefinedReason::ZeroDenominator,
    ))
}

/// Counts declared properties used in axioms.
///
/// For concepts, every anonymous object of a concept's triples is searched
/// (through nested anonymous nodes) for declared properties; this is where
/// restrictions name their `owl:onProperty`. For individuals, every asserted
/// predicate that is a declared property counts once per triple.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn property_usages(
    accessor: &dyn GraphAccessor,
    hierarchy: &Hierarchy,
) -> AccessorResult<usize> {
    let declared: HashSet<String> = accessor
        .list_object_properties()?
        .into_iter()
        .chain(accessor.list_datatype_properties()?)
        .map(|Property { iri, .. }| iri)
        .collect();
    if declared.is_empty() {
        return Ok(0);
    }

    let mut usages = 0;
    for concept in hierarchy.all_named_concepts() {
        for triple in accessor.list_triples(Some(&concept.node()), None, None)? {
            if triple.object.is_blank() {
                usages += properties_in_expression(accessor, &triple.object, &declared)?;
            }
        }
    }
    for individual in accessor.list_individuals()? {
        let subject = Node::iri(individual.iri);
        usages += accessor
            .list_triples(Some(&subject), None, None)?
            .iter()
            .filter(|t| t.predicate.as_iri().is_some_and(|p| declared.contains(p)))
            .count();
    }
    Ok(usages)
}

fn properties_in_expression(
    accessor: &dyn GraphAccessor,
    expression: &Node,
    declared: &HashSet<String>,
) -> AccessorResult<usize> {
    let mut found = 0;
    let mut visited = HashSet::new();
    let mut pending = vec![expression.clone()];
    while let Some(node) = pending.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }
        for triple in accessor.list_triples(Some(&node), None, None)? {
            match triple.object {
                Node::Iri(ref iri) if declared.contains(iri) => found += 1,
                Node::Blank(_) => pending.push(triple.object.clone()),
                _ => {}
            }
        }
    }
    Ok(found)
}
