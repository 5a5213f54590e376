//! Core graph model types.
//!
//! These types are owned, read-only snapshots of what a [`GraphAccessor`]
//! reports: RDF nodes and triples, named concepts, declared properties, and
//! individuals. Nothing in this crate mutates a graph once it has been built.
//!
//! [`GraphAccessor`]: crate::GraphAccessor

use std::fmt;

use serde::Serialize;

/// An RDF term as seen by the metric engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// An absolute IRI.
    Iri(String),
    /// A blank node label, unique within one loaded graph.
    Blank(String),
    /// A literal value.
    Literal {
        /// Lexical form of the literal.
        lexical: String,
        /// Datatype IRI, if one was given.
        datatype: Option<String>,
        /// Language tag, if one was given.
        language: Option<String>,
    },
}

impl Node {
    /// Creates an IRI node.
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    /// Creates a blank node.
    pub fn blank(label: impl Into<String>) -> Self {
        Node::Blank(label.into())
    }

    /// Creates a plain literal (no datatype, no language tag).
    pub fn literal(lexical: impl Into<String>) -> Self {
        Node::Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    /// Returns the IRI if this node is a URI resource.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns true for IRI nodes.
    #[must_use]
    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri(_))
    }

    /// Returns true for blank nodes.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }

    /// Returns the namespace part of an IRI node, `None` for other nodes.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.as_iri().map(|iri| split_iri(iri).0)
    }

    /// Returns the local-name part of an IRI node, `None` for other nodes.
    #[must_use]
    pub fn local_name(&self) -> Option<&str> {
        self.as_iri().map(|iri| split_iri(iri).1)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{}>", iri),
            Node::Blank(label) => write!(f, "_:{}", label),
            Node::Literal {
                lexical,
                datatype,
                language,
            } => {
                write!(f, "{:?}", lexical)?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)?;
                } else if let Some(dt) = datatype {
                    write!(f, "^^<{}>", dt)?;
                }
                Ok(())
            }
        }
    }
}

/// Splits an IRI into `(namespace, local_name)` after the last `#`, `/` or `:`.
///
/// An IRI without any separator is treated as all namespace.
#[must_use]
pub fn split_iri(iri: &str) -> (&str, &str) {
    match iri.rfind(['#', '/', ':']) {
        Some(idx) => iri.split_at(idx + 1),
        None => (iri, ""),
    }
}

/// A single RDF statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Triple {
    /// Subject (IRI or blank node).
    pub subject: Node,
    /// Predicate (always an IRI in well-formed RDF).
    pub predicate: Node,
    /// Object (any node).
    pub object: Node,
}

impl Triple {
    /// Creates a triple.
    pub fn new(subject: Node, predicate: Node, object: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// A named class node of the subsumption hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Concept {
    /// Full IRI (unique identifier).
    pub iri: String,
}

impl Concept {
    /// Creates a concept from its IRI.
    pub fn new(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    /// Display-only local name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        split_iri(&self.iri).1
    }

    /// Returns this concept as an IRI node.
    #[must_use]
    pub fn node(&self) -> Node {
        Node::Iri(self.iri.clone())
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

/// Whether a property relates two resources or a resource to a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PropertyKind {
    /// `owl:ObjectProperty`: relates two resources.
    Object,
    /// `owl:DatatypeProperty`: relates a resource to a literal.
    Datatype,
}

/// A declared object or datatype property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Property {
    /// Full IRI.
    pub iri: String,
    /// Object or datatype property.
    pub kind: PropertyKind,
}

impl Property {
    /// Creates a property.
    pub fn new(iri: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            iri: iri.into(),
            kind,
        }
    }
}

/// A named individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Individual {
    /// Full IRI.
    pub iri: String,
}

impl Individual {
    /// Creates an individual from its IRI.
    pub fn new(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }
}

/// The five restriction kinds recognised in subclass expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RestrictionKind {
    /// `owl:someValuesFrom`.
    SomeValuesFrom,
    /// `owl:allValuesFrom`.
    AllValuesFrom,
    /// `owl:hasValue`.
    HasValue,
    /// `owl:minCardinality`.
    MinCardinality,
    /// `owl:maxCardinality`.
    MaxCardinality,
    /// Not a recognised restriction (or not a restriction at all).
    None,
}

impl RestrictionKind {
    /// Returns true for the five recognised kinds.
    #[must_use]
    pub fn is_restriction(self) -> bool {
        self != RestrictionKind::None
    }
}

/// Standard IRI constants for the built-in vocabularies.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// OWL/XML presentation syntax namespace.
    pub const OWL_XML: &str = "http://www.w3.org/2003/05/owl-xml";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// XML namespace.
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

    /// Every built-in vocabulary namespace.
    pub const BUILT_IN_NAMESPACES: &[&str] = &[RDF, RDFS, OWL, OWL_XML, XSD, XML];

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:first`.
    pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    /// `rdf:rest`.
    pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// `rdf:nil`.
    pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

    /// `rdfs:Class`.
    pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    /// `rdfs:subClassOf`.
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// `rdfs:domain`.
    pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// `rdfs:range`.
    pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    /// `rdfs:label`.
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:comment`.
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    /// `rdfs:seeAlso`.
    pub const RDFS_SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
    /// `rdfs:isDefinedBy`.
    pub const RDFS_IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";

    /// `owl:Thing` (the top concept).
    pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    /// `owl:Nothing`.
    pub const OWL_NOTHING: &str = "http://www.w3.org/2002/07/owl#Nothing";
    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:Ontology`.
    pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    /// `owl:ObjectProperty`.
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `owl:DatatypeProperty`.
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    /// `owl:NamedIndividual`.
    pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
    /// `owl:Restriction`.
    pub const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
    /// `owl:onProperty`.
    pub const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
    /// `owl:someValuesFrom`.
    pub const OWL_SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
    /// `owl:allValuesFrom`.
    pub const OWL_ALL_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#allValuesFrom";
    /// `owl:hasValue`.
    pub const OWL_HAS_VALUE: &str = "http://www.w3.org/2002/07/owl#hasValue";
    /// `owl:minCardinality`.
    pub const OWL_MIN_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#minCardinality";
    /// `owl:maxCardinality`.
    pub const OWL_MAX_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#maxCardinality";
    /// `owl:unionOf`.
    pub const OWL_UNION_OF: &str = "http://www.w3.org/2002/07/owl#unionOf";
    /// `owl:intersectionOf`.
    pub const OWL_INTERSECTION_OF: &str = "http://www.w3.org/2002/07/owl#intersectionOf";
    /// `owl:versionInfo`.
    pub const OWL_VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";

    /// Annotation predicates counted by annotation richness.
    pub const ANNOTATION_PREDICATES: &[&str] = &[
        RDFS_COMMENT,
        RDFS_LABEL,
        RDFS_SEE_ALSO,
        RDFS_IS_DEFINED_BY,
        OWL_VERSION_INFO,
    ];

    /// Returns true if `iri` lies in one of the built-in vocabularies.
    #[must_use]
    pub fn is_built_in(iri: &str) -> bool {
        BUILT_IN_NAMESPACES.iter().any(|ns| iri.starts_with(ns))
    }
}
