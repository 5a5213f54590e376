//! The class-subsumption hierarchy and its root-to-leaf path enumeration.
//!
//! [`Hierarchy::load`] snapshots the direct parent and child relations the
//! accessor reports into an arena of concepts indexed by position. Paths are
//! enumerated with an explicit stack, so depth is bounded by memory rather
//! than the call stack, and an on-path marker set rejects any edge that would
//! revisit a concept already on the current path. Metrics that only need
//! path counts and lengths use [`Hierarchy::path_stats`], which runs the same
//! walk without keeping the paths.
//!
//! # Example
//!
//! ```
//! use ontometrics::hierarchy::{Hierarchy, WalkBudget};
//! use ontometrics::Diagnostics;
//! use ontometrics_graph::turtle;
//!
//! let store = turtle::load_turtle(ontometrics::tests::fixtures::CHAIN)?;
//! let hierarchy = Hierarchy::load(&store)?;
//! let mut diagnostics = Diagnostics::new();
//! let paths = hierarchy
//!     .enumerate_paths(&WalkBudget::unbounded(), &mut diagnostics)
//!     .map_err(|e| e.to_string())?;
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths.longest_path_length(), Some(5));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use ontometrics_graph::{AccessorResult, Concept, GraphAccessor};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::report::{MetricValue, UndefinedReason};

/// How many DFS steps run between deadline checks.
const DEADLINE_CHECK_INTERVAL: u32 = 256;

/// Size and time limits for one path enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkBudget {
    max_paths: usize,
    deadline: Option<Instant>,
}

impl WalkBudget {
    /// A budget of `max_paths` paths and `timeout` wall-clock time from now.
    #[must_use]
    pub fn new(max_paths: usize, timeout: Duration) -> Self {
        Self {
            max_paths,
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// No limits.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_paths: usize::MAX,
            deadline: None,
        }
    }

    /// Maximum number of paths that may be enumerated.
    #[must_use]
    pub fn max_paths(&self) -> usize {
        self.max_paths
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

impl Default for WalkBudget {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Path enumeration stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BudgetExceeded {
    /// More than the allowed number of paths exist.
    #[error("path enumeration exceeded the limit of {limit} paths")]
    MaxPaths {
        /// The configured limit.
        limit: usize,
    },
    /// The deadline passed.
    #[error("path enumeration timed out after {paths} paths")]
    Deadline {
        /// Paths enumerated before the deadline.
        paths: usize,
    },
}

impl From<BudgetExceeded> for MetricValue {
    fn from(_: BudgetExceeded) -> Self {
        MetricValue::Undefined(UndefinedReason::BudgetExceeded)
    }
}

/// Snapshot of the direct subsumption relation over named concepts.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    concepts: Vec<Concept>,
    index: HashMap<Concept, usize>,
    parents: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    self_edges: Vec<usize>,
}

impl Hierarchy {
    /// Reads every named concept with its direct parents and children.
    ///
    /// Edges to concepts the accessor does not list as named are dropped.
    /// A reflexive edge (`C rdfs:subClassOf C`) is not a parent or child
    /// relation: it is kept aside and reported when paths are enumerated. A
    /// concept whose only parent is itself is a root.
    ///
    /// # Errors
    ///
    /// Returns the first accessor error encountered.
    pub fn load(accessor: &dyn GraphAccessor) -> AccessorResult<Self> {
        let concepts = accessor.list_named_classes()?;
        let index: HashMap<Concept, usize> = concepts
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        let resolve = |related: Vec<Concept>| -> Vec<usize> {
            related
                .iter()
                .filter_map(|c| index.get(c).copied())
                .collect()
        };

        let mut parents = Vec::with_capacity(concepts.len());
        let mut children = Vec::with_capacity(concepts.len());
        let mut self_edges = Vec::new();
        for (i, concept) in concepts.iter().enumerate() {
            let mut up = resolve(accessor.direct_superclasses(concept)?);
            let mut down = resolve(accessor.direct_subclasses(concept)?);
            if up.contains(&i) || down.contains(&i) {
                self_edges.push(i);
                up.retain(|&j| j != i);
                down.retain(|&j| j != i);
            }
            parents.push(up);
            children.push(down);
        }
        let mut roots = resolve(accessor.hierarchy_roots()?);
        for &i in &self_edges {
            if parents[i].is_empty() && !roots.contains(&i) {
                roots.push(i);
            }
        }

        tracing::debug!(
            concepts = concepts.len(),
            roots = roots.len(),
            self_edges = self_edges.len(),
            "hierarchy loaded"
        );
        Ok(Self {
            concepts,
            index,
            parents,
            children,
            roots,
            self_edges,
        })
    }

    /// Number of named concepts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Returns true if there are no named concepts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Every named concept, in accessor order.
    #[must_use]
    pub fn all_named_concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Direct named parents of `concept` (empty for unknown concepts).
    pub fn direct_parents(&self, concept: &Concept) -> impl Iterator<Item = &Concept> + '_ {
        self.related(&self.parents, concept)
    }

    /// Direct named children of `concept` (empty for unknown concepts).
    pub fn direct_children(&self, concept: &Concept) -> impl Iterator<Item = &Concept> + '_ {
        self.related(&self.children, concept)
    }

    fn related<'a>(
        &'a self,
        relation: &'a [Vec<usize>],
        concept: &Concept,
    ) -> impl Iterator<Item = &'a Concept> + 'a {
        self.index
            .get(concept)
            .map(|&i| relation[i].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&j| &self.concepts[j])
    }

    /// Number of direct named parents of each concept, in accessor order.
    pub fn parent_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.parents.iter().map(Vec::len)
    }

    /// Number of direct named children of each concept, in accessor order.
    pub fn child_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.children.iter().map(Vec::len)
    }

    /// Concepts without a named parent.
    #[must_use]
    pub fn root_concepts(&self) -> Vec<&Concept> {
        self.roots.iter().map(|&i| &self.concepts[i]).collect()
    }

    /// Concepts without a direct child.
    #[must_use]
    pub fn leaf_concepts(&self) -> Vec<&Concept> {
        self.leaf_indices().map(|i| &self.concepts[i]).collect()
    }

    fn leaf_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.concepts.len()).filter(|&i| self.children[i].is_empty())
    }

    /// Sum of direct parent counts over leaf concepts.
    #[must_use]
    pub fn leaf_parent_total(&self) -> usize {
        self.leaf_indices().map(|i| self.parents[i].len()).sum()
    }

    /// Total number of direct subclass edges between named concepts.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.child_counts().sum()
    }

    /// Concepts asserted as their own subclass.
    #[must_use]
    pub fn self_referential_concepts(&self) -> Vec<&Concept> {
        self.self_edges.iter().map(|&i| &self.concepts[i]).collect()
    }

    /// Enumerates every simple path from a root to a leaf.
    ///
    /// A concept reachable through several parents yields one path per
    /// parent edge. An edge leading back onto the current path is skipped and
    /// recorded as a [`DiagnosticKind::MalformedHierarchy`] diagnostic; a
    /// branch that only continues through such edges produces no path. Each
    /// reflexive edge set aside by [`Hierarchy::load`] is recorded the same
    /// way.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetExceeded`] (after recording a diagnostic) if the path
    /// count or deadline of `budget` is exceeded.
    pub fn enumerate_paths(
        &self,
        budget: &WalkBudget,
        diagnostics: &mut Diagnostics,
    ) -> Result<PathSet<'_>, BudgetExceeded> {
        let mut paths: Vec<Box<[usize]>> = Vec::new();
        self.run_walk(budget, diagnostics, &mut paths)?;
        Ok(PathSet {
            hierarchy: self,
            paths,
        })
    }

    /// Walks the same paths as [`Hierarchy::enumerate_paths`] but keeps only
    /// their count and lengths.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetExceeded`] (after recording a diagnostic) if the path
    /// count or deadline of `budget` is exceeded.
    pub fn path_stats(
        &self,
        budget: &WalkBudget,
        diagnostics: &mut Diagnostics,
    ) -> Result<PathStats, BudgetExceeded> {
        let mut stats = PathStats::default();
        self.run_walk(budget, diagnostics, &mut stats)?;
        Ok(stats)
    }

    fn run_walk<S: PathSink>(
        &self,
        budget: &WalkBudget,
        diagnostics: &mut Diagnostics,
        sink: &mut S,
    ) -> Result<(), BudgetExceeded> {
        if self.roots.is_empty() && !self.concepts.is_empty() {
            diagnostics.warn(
                DiagnosticKind::MissingRoot,
                format!(
                    "none of the {} named concepts is a hierarchy root; no paths enumerated",
                    self.concepts.len()
                ),
            );
        }
        for &i in &self.self_edges {
            diagnostics.cycle_edge(&self.concepts[i], &self.concepts[i]);
        }

        let result = self.walk(budget, diagnostics, sink);
        if let Err(exceeded) = &result {
            diagnostics.warn(DiagnosticKind::BudgetExceeded, exceeded.to_string());
        }
        result
    }

    fn walk<S: PathSink>(
        &self,
        budget: &WalkBudget,
        diagnostics: &mut Diagnostics,
        sink: &mut S,
    ) -> Result<(), BudgetExceeded> {
        let mut on_path = vec![false; self.concepts.len()];
        let mut path: Vec<usize> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut steps: u32 = 0;

        for &root in &self.roots {
            stack.push(Frame::new(root));
            on_path[root] = true;
            path.push(root);

            while let Some(frame) = stack.last_mut() {
                steps = steps.wrapping_add(1);
                if steps % DEADLINE_CHECK_INTERVAL == 0 && budget.expired() {
                    return Err(BudgetExceeded::Deadline {
                        paths: sink.count(),
                    });
                }

                let node = frame.node;
                let children = &self.children[node];
                if children.is_empty() {
                    if sink.count() >= budget.max_paths {
                        return Err(BudgetExceeded::MaxPaths {
                            limit: budget.max_paths,
                        });
                    }
                    sink.accept(&path);
                } else if let Some(&child) = children.get(frame.next) {
                    frame.next += 1;
                    if on_path[child] {
                        diagnostics.cycle_edge(&self.concepts[node], &self.concepts[child]);
                    } else {
                        on_path[child] = true;
                        path.push(child);
                        stack.push(Frame::new(child));
                    }
                    continue;
                }

                on_path[node] = false;
                path.pop();
                stack.pop();
            }
        }

        tracing::debug!(paths = sink.count(), "root-to-leaf paths walked");
        Ok(())
    }
}

/// Receives each completed root-to-leaf path during a walk.
trait PathSink {
    fn accept(&mut self, path: &[usize]);
    fn count(&self) -> usize;
}

impl PathSink for Vec<Box<[usize]>> {
    fn accept(&mut self, path: &[usize]) {
        self.push(path.into());
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl PathSink for PathStats {
    fn accept(&mut self, path: &[usize]) {
        self.count += 1;
        self.total_length += path.len();
        self.longest = self.longest.max(Some(path.len()));
    }

    fn count(&self) -> usize {
        self.count
    }
}

/// Count and lengths of the root-to-leaf paths of a [`Hierarchy`], without
/// the paths themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStats {
    /// Number of paths.
    pub count: usize,
    /// Sum of all path lengths.
    pub total_length: usize,
    /// The maximum path length, `None` when there are no paths.
    pub longest: Option<usize>,
}

struct Frame {
    node: usize,
    next: usize,
}

impl Frame {
    fn new(node: usize) -> Self {
        Self { node, next: 0 }
    }
}

/// The root-to-leaf paths of a [`Hierarchy`].
///
/// Path length is the number of concepts on the path, so a lone root that is
/// also a leaf has length 1.
#[derive(Debug, Clone)]
pub struct PathSet<'h> {
    hierarchy: &'h Hierarchy,
    paths: Vec<Box<[usize]>>,
}

impl<'h> PathSet<'h> {
    /// Number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if no path was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Length of each path, in enumeration order.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.paths.iter().map(|p| p.len())
    }

    /// Sum of all path lengths.
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.lengths().sum()
    }

    /// The maximum path length, `None` when there are no paths.
    #[must_use]
    pub fn longest_path_length(&self) -> Option<usize> {
        self.lengths().max()
    }

    /// Iterates paths as root-first concept sequences.
    pub fn iter(&self) -> impl Iterator<Item = Vec<&'h Concept>> + '_ {
        let hierarchy = self.hierarchy;
        self.paths
            .iter()
            .map(move |p| p.iter().map(|&i| &hierarchy.concepts[i]).collect())
    }
}
