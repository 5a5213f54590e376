//! Per-concept richness metrics: annotations, restrictions and individuals.

use std::collections::HashSet;

use ontometrics_graph::{iris, AccessorError, AccessorResult, GraphAccessor, Node};

use super::MetricContext;
use crate::diagnostics::Diagnostics;
use crate::report::{MetricValue, UndefinedReason};

type MetricResult = Result<MetricValue, AccessorError>;

/// AN: annotation assertions (comment, label, seeAlso, isDefinedBy,
/// versionInfo) on concepts, per concept.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn annotation_richness(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let accessor = ctx.accessor();
    let concepts = accessor.list_named_classes()?;
    let predicates: Vec<Node> = iris::ANNOTATION_PREDICATES
        .iter()
        .map(|p| Node::iri(*p))
        .collect();

    let mut annotations = 0;
    for concept in &concepts {
        let subject = concept.node();
        for predicate in &predicates {
            annotations += accessor
                .list_triples(Some(&subject), Some(predicate), None)?
                .len();
        }
    }
    Ok(MetricValue::count_ratio(
        annotations,
        concepts.len(),
        UndefinedReason::NoConcepts,
    ))
}

/// AR: recognised restrictions among superclass expressions, per concept.
///
/// Restrictions nested in `owl:intersectionOf` / `owl:unionOf` operands of
/// an anonymous superclass are counted too.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn attribute_richness(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let accessor = ctx.accessor();
    let concepts = accessor.list_named_classes()?;
    let mut restrictions = 0;
    for concept in &concepts {
        for expression in accessor.superclass_expressions(concept)? {
            restrictions += restrictions_in(accessor, &expression)?;
        }
    }
    Ok(MetricValue::count_ratio(
        restrictions,
        concepts.len(),
        UndefinedReason::NoConcepts,
    ))
}

/// CR: direct individuals per concept.
///
/// # Errors
///
/// Propagates accessor failures.
pub fn individual_richness(ctx: &MetricContext<'_>, _: &mut Diagnostics) -> MetricResult {
    let accessor = ctx.accessor();
    let concepts = accessor.list_named_classes()?;
    let instances = concepts.iter().try_fold(0usize, |sum, c| -> AccessorResult<usize> {
        Ok(sum + accessor.direct_instances(c)?.len())
    })?;
    Ok(MetricValue::count_ratio(
        instances,
        concepts.len(),
        UndefinedReason::NoConcepts,
    ))
}

/// Counts recognised restrictions in one class expression.
fn restrictions_in(accessor: &dyn GraphAccessor, expression: &Node) -> AccessorResult<usize> {
    let mut count = 0;
    let mut visited = HashSet::new();
    let mut pending = vec![expression.clone()];
    while let Some(node) = pending.pop() {
        if !node.is_blank() || !visited.insert(node.clone()) {
            continue;
        }
        if accessor.restriction_kind(&node)?.is_restriction() {
            count += 1;
            continue;
        }
        for operator in [iris::OWL_INTERSECTION_OF, iris::OWL_UNION_OF] {
            let operator = Node::iri(operator);
            for triple in accessor.list_triples(Some(&node), Some(&operator), None)? {
                pending.extend(list_members(accessor, &triple.object)?);
            }
        }
    }
    Ok(count)
}

/// Members of an `rdf:List`, stopping at `rdf:nil` or a revisited cell.
fn list_members(accessor: &dyn GraphAccessor, head: &Node) -> AccessorResult<Vec<Node>> {
    let first = Node::iri(iris::RDF_FIRST);
    let rest = Node::iri(iris::RDF_REST);
    let nil = Node::iri(iris::RDF_NIL);
    let mut members = Vec::new();
    let mut seen = HashSet::new();
    let mut cell = Some(head.clone());
    while let Some(current) = cell.take() {
        if current == nil || !seen.insert(current.clone()) {
            break;
        }
        members.extend(
            accessor
                .list_triples(Some(&current), Some(&first), None)?
                .into_iter()
                .map(|t| t.object),
        );
        cell = accessor
            .list_triples(Some(&current), Some(&rest), None)?
            .into_iter()
            .next()
            .map(|t| t.object);
    }
    Ok(members)
}
