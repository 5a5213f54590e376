//! The read-only query interface the metric engine consumes.
//!
//! Every query is *direct*: parent/child and domain relations are reported as
//! asserted, never inferred. Collections are returned deduplicated and sorted
//! so that every computation built on top of them is deterministic.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::model::{Concept, Individual, Node, Property, RestrictionKind, Triple};

/// Errors raised when a graph cannot answer a query or cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum AccessorError {
    /// A query against the backing graph failed.
    #[error("query `{query}` failed: {message}")]
    QueryFailed {
        /// Name of the failing query (e.g. `direct_superclasses`).
        query: String,
        /// Failure description from the backing store.
        message: String,
    },

    /// A document could not be parsed into a graph.
    #[error("failed to load {source_name}: {message}")]
    Load {
        /// File name or `<string>` for in-memory input.
        source_name: String,
        /// Parser message.
        message: String,
    },

    /// A document could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl AccessorError {
    /// Convenience constructor for [`AccessorError::QueryFailed`].
    pub fn query_failed(query: impl Into<String>, message: impl Into<String>) -> Self {
        AccessorError::QueryFailed {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Name of the failing query, when this is a query failure.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        match self {
            AccessorError::QueryFailed { query, .. } => Some(query),
            _ => None,
        }
    }
}

/// Result alias for accessor queries.
pub type AccessorResult<T> = Result<T, AccessorError>;

/// Read-only view of an already-materialized ontology graph.
///
/// Implementations must be safe to query from several threads at once; the
/// metric engine evaluates metrics concurrently against one shared accessor.
pub trait GraphAccessor: Send + Sync {
    /// All named (IRI-identified) classes, excluding the top concept.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn list_named_classes(&self) -> AccessorResult<Vec<Concept>>;

    /// Named classes asserted as direct parents of `concept`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn direct_superclasses(&self, concept: &Concept) -> AccessorResult<Vec<Concept>>;

    /// Named classes asserted as direct children of `concept`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn direct_subclasses(&self, concept: &Concept) -> AccessorResult<Vec<Concept>>;

    /// Every asserted superclass expression of `concept`, named or anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn superclass_expressions(&self, concept: &Concept) -> AccessorResult<Vec<Node>>;

    /// Named classes without any named parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn hierarchy_roots(&self) -> AccessorResult<Vec<Concept>>;

    /// Object and datatype properties whose domain includes `concept`.
    ///
    /// With `direct == false` properties declared on ancestors are included.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn declared_properties(&self, concept: &Concept, direct: bool)
        -> AccessorResult<Vec<Property>>;

    /// All declared object properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn list_object_properties(&self) -> AccessorResult<Vec<Property>>;

    /// All declared datatype properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn list_datatype_properties(&self) -> AccessorResult<Vec<Property>>;

    /// All named individuals.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn list_individuals(&self) -> AccessorResult<Vec<Individual>>;

    /// Individuals asserted as direct members of `concept`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn direct_instances(&self, concept: &Concept) -> AccessorResult<Vec<Individual>>;

    /// Pattern match over all triples; `None` is a wildcard.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn list_triples(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> AccessorResult<Vec<Triple>>;

    /// Declared namespace prefixes (`prefix -> namespace IRI`).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn namespace_prefix_map(&self) -> AccessorResult<BTreeMap<String, String>>;

    /// The ontology's own namespace, if one can be determined.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn base_namespace(&self) -> AccessorResult<Option<String>>;

    /// Classifies a class expression as one of the recognised restrictions.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing graph cannot be queried.
    fn restriction_kind(&self, expr: &Node) -> AccessorResult<RestrictionKind>;
}
