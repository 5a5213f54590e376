//! Read-only RDF/OWL graph layer for ontology metrics.
//!
//! The `ontometrics-graph` crate provides the owned graph model, the
//! [`GraphAccessor`] query trait that metric computations run against, an
//! indexed in-memory [`TripleStore`] implementing it, and Turtle, N-Triples
//! and RDF/XML loading.
//!
//! # Entry Point
//!
//! ```
//! use ontometrics_graph::{GraphAccessor, turtle};
//!
//! let store = turtle::load_turtle(
//!     "@prefix : <http://example.org/zoo#> .\n\
//!      @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
//!      @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
//!      :Animal a owl:Class .\n\
//!      :Dog a owl:Class ; rdfs:subClassOf :Animal .\n",
//! )?;
//! assert_eq!(store.list_named_classes()?.len(), 2);
//! assert_eq!(store.hierarchy_roots()?.len(), 1);
//! # Ok::<(), ontometrics_graph::AccessorError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod accessor;
pub mod model;
pub mod rdfxml;
pub mod store;
pub mod turtle;

pub use accessor::{AccessorError, AccessorResult, GraphAccessor};
pub use model::{
    iris, split_iri, Concept, Individual, Node, Property, PropertyKind, RestrictionKind, Triple,
};
pub use store::TripleStore;
