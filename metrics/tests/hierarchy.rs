//! Hierarchy Integration Tests
//!
//! Path enumeration and the hierarchy metrics over fixture ontologies and
//! programmatically built stores, including malformed hierarchies.

use std::time::Duration;

use ontometrics::tests::fixtures;
use ontometrics::{
    BudgetExceeded, DiagnosticKind, Diagnostics, EngineConfig, Hierarchy, MetricEngine,
    MetricName, MetricValue, MetricsReport, UndefinedReason, WalkBudget,
};
use ontometrics_graph::{iris, turtle, Node, Triple, TripleStore};
use proptest::prelude::*;

const EX: &str = "http://example.org/gen#";

fn concept(i: usize) -> Node {
    Node::iri(format!("{EX}C{i}"))
}

fn store_from_edges(n: usize, edges: &[(usize, usize)]) -> TripleStore {
    let classes = (0..n).map(|i| {
        Triple::new(concept(i), Node::iri(iris::RDF_TYPE), Node::iri(iris::OWL_CLASS))
    });
    let subclass = edges.iter().map(|&(child, parent)| {
        Triple::new(
            concept(child),
            Node::iri(iris::RDFS_SUBCLASS_OF),
            concept(parent),
        )
    });
    TripleStore::new(classes.chain(subclass).collect::<Vec<_>>())
}

fn chain(k: usize) -> TripleStore {
    let edges: Vec<(usize, usize)> = (1..k).map(|i| (i, i - 1)).collect();
    store_from_edges(k, &edges)
}

fn run(store: &TripleStore, metrics: &[MetricName]) -> MetricsReport {
    MetricEngine::new(EngineConfig::default())
        .unwrap()
        .run_selection(store, metrics)
        .unwrap()
}

// ============================================================================
// Chains
// ============================================================================

/// A chain of k concepts has depth k, one path, and no tangledness.
#[test]
fn test_chain_depth_equals_length() {
    for k in 1..=8 {
        let store = chain(k);
        let report = run(&store, &[MetricName::Dit, MetricName::Wmc, MetricName::Tm]);
        assert_eq!(report.value(MetricName::Dit), Some(MetricValue::Defined(k as f64)));
        // One leaf, one path.
        assert_eq!(report.value(MetricName::Wmc), Some(MetricValue::Defined(1.0)));
        assert_eq!(
            report.value(MetricName::Tm),
            Some(MetricValue::Undefined(UndefinedReason::NoMultiParentConcepts))
        );

        let hierarchy = Hierarchy::load(&store).unwrap();
        let paths = hierarchy
            .enumerate_paths(&WalkBudget::unbounded(), &mut Diagnostics::new())
            .unwrap();
        assert_eq!(paths.len(), 1);
    }
}

/// The Turtle chain fixture agrees with the generated chains.
#[test]
fn test_chain_fixture() {
    let store = turtle::load_turtle(fixtures::CHAIN).unwrap();
    let report = run(&store, &[MetricName::Dit, MetricName::Lcom, MetricName::Inr]);
    assert_eq!(report.value(MetricName::Dit), Some(MetricValue::Defined(5.0)));
    assert_eq!(report.value(MetricName::Lcom), Some(MetricValue::Defined(5.0)));
    assert_eq!(report.value(MetricName::Inr), Some(MetricValue::Defined(0.8)));
    assert_eq!(report.diagnostic_count(), 0);
}

// ============================================================================
// Edge counts
// ============================================================================

/// Child counts summed over all concepts equal the subclass edge count.
#[test]
fn test_child_counts_sum_to_edge_count() {
    let store = turtle::load_turtle(fixtures::ZOO).unwrap();
    let hierarchy = Hierarchy::load(&store).unwrap();
    assert_eq!(hierarchy.child_counts().sum::<usize>(), 7);
    assert_eq!(hierarchy.parent_counts().sum::<usize>(), 7);
    assert_eq!(hierarchy.edge_count(), 7);
}

/// In a tree, NOC is the mean out-degree of the non-leaf concepts.
#[test]
fn test_children_per_concept_is_mean_out_degree() {
    // 0 has children 1, 2, 3; 1 has children 4, 5. Leaves: 2, 3, 4, 5.
    let store = store_from_edges(6, &[(1, 0), (2, 0), (3, 0), (4, 1), (5, 1)]);
    let report = run(&store, &[MetricName::Noc, MetricName::Nac, MetricName::Cbo]);
    assert_eq!(report.value(MetricName::Noc), Some(MetricValue::Defined(2.5)));
    assert_eq!(report.value(MetricName::Nac), Some(MetricValue::Defined(1.0)));
    assert_eq!(report.value(MetricName::Cbo), Some(MetricValue::Defined(1.0)));
}

/// Multiple inheritance is not deduplicated: each parent edge yields a path.
#[test]
fn test_multiple_inheritance_paths() {
    let store = turtle::load_turtle(fixtures::ZOO).unwrap();
    let hierarchy = Hierarchy::load(&store).unwrap();
    let paths = hierarchy
        .enumerate_paths(&WalkBudget::unbounded(), &mut Diagnostics::new())
        .unwrap();
    assert_eq!(paths.len(), 4);
    let through_bat = paths
        .iter()
        .filter(|p| p.last().is_some_and(|c| c.local_name() == "Bat"))
        .count();
    assert_eq!(through_bat, 2);

    let stats = hierarchy
        .path_stats(&WalkBudget::unbounded(), &mut Diagnostics::new())
        .unwrap();
    assert_eq!(stats.count, paths.len());
    assert_eq!(stats.total_length, paths.total_length());
    assert_eq!(stats.longest, paths.longest_path_length());

    let report = run(&store, &[MetricName::Wmc, MetricName::Lcom]);
    // 4 paths over 3 leaves, every path has 3 concepts.
    assert_eq!(report.value(MetricName::Wmc), Some(MetricValue::Defined(4.0 / 3.0)));
    assert_eq!(report.value(MetricName::Lcom), Some(MetricValue::Defined(3.0)));
}

// ============================================================================
// Malformed hierarchies
// ============================================================================

/// A self-referential subclass edge is skipped and reported once.
#[test]
fn test_self_loop_terminates() {
    let store = turtle::load_turtle(fixtures::CYCLE).unwrap();
    let hierarchy = Hierarchy::load(&store).unwrap();
    let mut diagnostics = Diagnostics::new();
    let paths = hierarchy
        .enumerate_paths(&WalkBudget::unbounded(), &mut diagnostics)
        .unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths.longest_path_length(), Some(3));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.contains(DiagnosticKind::MalformedHierarchy));

    let report = run(&store, &[MetricName::Dit]);
    let outcome = &report.results[&MetricName::Dit];
    assert_eq!(outcome.value, MetricValue::Defined(3.0));
    assert_eq!(outcome.diagnostics.len(), 1);
}

/// A leaf listed as its own subclass keeps its path and is not tangled.
#[test]
fn test_self_loop_on_leaf() {
    let store = turtle::load_turtle(fixtures::SELF_LOOP).unwrap();
    let report = run(
        &store,
        &[
            MetricName::Dit,
            MetricName::Wmc,
            MetricName::Nac,
            MetricName::Tm,
            MetricName::Cbo,
        ],
    );
    assert_eq!(report.value(MetricName::Dit), Some(MetricValue::Defined(3.0)));
    assert_eq!(report.value(MetricName::Wmc), Some(MetricValue::Defined(1.0)));
    assert_eq!(report.value(MetricName::Nac), Some(MetricValue::Defined(1.0)));
    assert_eq!(report.value(MetricName::Cbo), Some(MetricValue::Defined(1.0)));
    assert_eq!(
        report.value(MetricName::Tm),
        Some(MetricValue::Undefined(UndefinedReason::NoMultiParentConcepts))
    );

    let dit = &report.results[&MetricName::Dit];
    assert_eq!(dit.diagnostics.len(), 1);
    assert_eq!(dit.diagnostics[0].kind, DiagnosticKind::MalformedHierarchy);
}

/// Without a root there are no paths; path metrics are undefined.
#[test]
fn test_rootless_hierarchy() {
    let store = turtle::load_turtle(fixtures::ROOTLESS).unwrap();
    let report = run(&store, &[MetricName::Dit, MetricName::Lcom, MetricName::Cbo]);
    assert_eq!(
        report.value(MetricName::Dit),
        Some(MetricValue::Undefined(UndefinedReason::NoPaths))
    );
    assert_eq!(
        report.value(MetricName::Lcom),
        Some(MetricValue::Undefined(UndefinedReason::NoPaths))
    );
    assert_eq!(report.value(MetricName::Cbo), Some(MetricValue::Defined(1.0)));
    assert!(report.results[&MetricName::Dit]
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::MissingRoot));
}

/// A configured path limit bounds only the path metrics.
#[test]
fn test_budget_applies_per_metric() {
    let store = turtle::load_turtle(fixtures::ZOO).unwrap();
    let mut config = EngineConfig::default();
    config.walk.max_paths = 2;
    let report = MetricEngine::new(config)
        .unwrap()
        .run_selection(&store, &[MetricName::Dit, MetricName::Tm])
        .unwrap();
    assert_eq!(
        report.value(MetricName::Dit),
        Some(MetricValue::Undefined(UndefinedReason::BudgetExceeded))
    );
    assert_eq!(report.value(MetricName::Tm), Some(MetricValue::Defined(2.0)));
}

/// `layers` layers of two concepts, each a child of both concepts above it:
/// 2^`layers` root-to-leaf paths.
fn layered(layers: usize) -> TripleStore {
    let mut edges = vec![(1, 0), (2, 0)];
    for layer in 1..layers {
        let first = 1 + 2 * layer;
        for child in [first, first + 1] {
            edges.push((child, first - 2));
            edges.push((child, first - 1));
        }
    }
    store_from_edges(1 + 2 * layers, &edges)
}

/// A short deadline stops the walk on a hierarchy with 2^20 paths.
#[test]
fn test_deadline_stops_path_enumeration() {
    let store = layered(20);
    let hierarchy = Hierarchy::load(&store).unwrap();
    let budget = WalkBudget::new(usize::MAX, Duration::from_millis(5));
    let mut diagnostics = Diagnostics::new();
    let err = hierarchy
        .enumerate_paths(&budget, &mut diagnostics)
        .unwrap_err();
    assert!(matches!(err, BudgetExceeded::Deadline { .. }));
    assert!(diagnostics.contains(DiagnosticKind::BudgetExceeded));
}

/// A configured timeout makes every path metric undefined; others still run.
#[test]
fn test_timeout_applies_per_metric() {
    let store = layered(20);
    let mut config = EngineConfig::default();
    config.walk.max_paths = usize::MAX;
    config.walk.timeout_ms = 5;
    let report = MetricEngine::new(config)
        .unwrap()
        .run_selection(
            &store,
            &[MetricName::Dit, MetricName::Lcom, MetricName::Wmc, MetricName::Noc],
        )
        .unwrap();
    for metric in [MetricName::Dit, MetricName::Lcom, MetricName::Wmc] {
        assert_eq!(
            report.value(metric),
            Some(MetricValue::Undefined(UndefinedReason::BudgetExceeded)),
            "{metric}"
        );
        assert!(report.results[&metric]
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::BudgetExceeded));
    }
    // 78 edges over the 39 concepts that have children.
    assert_eq!(report.value(MetricName::Noc), Some(MetricValue::Defined(2.0)));
}

// ============================================================================
// Random graphs
// ============================================================================

proptest! {
    /// Enumeration terminates on arbitrary graphs, cycles included, and every
    /// path is simple, starts at a root and ends at a leaf.
    #[test]
    fn test_random_graphs_terminate(
        n in 1usize..8,
        raw in proptest::collection::vec((0usize..8, 0usize..8), 0..20),
    ) {
        let edges: Vec<(usize, usize)> = raw.into_iter().map(|(c, p)| (c % n, p % n)).collect();
        let store = store_from_edges(n, &edges);
        let hierarchy = Hierarchy::load(&store).unwrap();
        let budget = WalkBudget::new(100_000, Duration::from_secs(10));
        let paths = hierarchy.enumerate_paths(&budget, &mut Diagnostics::new()).unwrap();

        let roots = hierarchy.root_concepts();
        let leaves = hierarchy.leaf_concepts();
        for path in paths.iter() {
            let mut seen = std::collections::HashSet::new();
            prop_assert!(path.iter().all(|c| seen.insert(c.iri.clone())));
            prop_assert!(path.first().is_some_and(|c| roots.contains(c)));
            prop_assert!(path.last().is_some_and(|c| leaves.contains(c)));
        }
        prop_assert!(paths.longest_path_length().unwrap_or(0) <= n);
    }
}
