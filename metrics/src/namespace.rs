//! Namespace classification and resource-usage tallying.
//!
//! Every IRI falls into exactly one [`NamespaceClass`]: the built-in
//! vocabularies win over the ontology's own base namespace, and everything
//! else is external. [`UsageTally`] applies the classifier to every IRI
//! position of every triple, which is the shared input of composability and
//! aggregability.

use std::collections::BTreeMap;
use std::fmt;

use ontometrics_graph::{iris, split_iri, AccessorResult, GraphAccessor, Node};
use serde::Serialize;

/// The namespace partition of resource IRIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceClass {
    /// RDF, RDFS, OWL, OWL/XML, XSD, XML (plus any configured extras).
    Default,
    /// The ontology's own base namespace.
    Internal,
    /// Anything else.
    External,
}

impl fmt::Display for NamespaceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceClass::Default => f.write_str("default"),
            NamespaceClass::Internal => f.write_str("internal"),
            NamespaceClass::External => f.write_str("external"),
        }
    }
}

/// Classifies IRIs into [`NamespaceClass`]es by prefix match.
///
/// Holds no mutable state; one classifier is shared by every metric of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceClassifier {
    defaults: Vec<String>,
    base: Option<String>,
}

impl NamespaceClassifier {
    /// Creates a classifier for the built-in vocabularies and `base`.
    ///
    /// An empty `base` is treated as absent (it would otherwise match every
    /// IRI).
    pub fn new(base: Option<impl Into<String>>) -> Self {
        let base: Option<String> = base.map(Into::into);
        Self {
            defaults: iris::BUILT_IN_NAMESPACES
                .iter()
                .map(|ns| (*ns).to_string())
                .collect(),
            base: base.filter(|b| !b.is_empty()),
        }
    }

    /// Adds further namespaces to the default vocabulary set.
    #[must_use]
    pub fn with_extra_defaults<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults.extend(
            extra
                .into_iter()
                .map(Into::<String>::into)
                .filter(|ns| !ns.is_empty()),
        );
        self
    }

    /// The base namespace, if any.
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Returns true if `iri` lies in a default vocabulary.
    #[must_use]
    pub fn is_default(&self, iri: &str) -> bool {
        self.defaults.iter().any(|ns| iri.starts_with(ns.as_str()))
    }

    /// Classifies one IRI.
    #[must_use]
    pub fn classify(&self, iri: &str) -> NamespaceClass {
        if self.is_default(iri) {
            NamespaceClass::Default
        } else if self.base.as_deref().is_some_and(|base| iri.starts_with(base)) {
            NamespaceClass::Internal
        } else {
            NamespaceClass::External
        }
    }

    /// Classifies a node; blank nodes and literals have no namespace.
    #[must_use]
    pub fn classify_node(&self, node: &Node) -> Option<NamespaceClass> {
        node.as_iri().map(|iri| self.classify(iri))
    }
}

/// Resource usages per namespace class, counted over every triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageTally {
    /// Occurrences in a default vocabulary.
    pub default: u64,
    /// Occurrences in the base namespace.
    pub internal: u64,
    /// Occurrences in external namespaces.
    pub external: u64,
    /// External occurrences attributed to a namespace IRI.
    pub per_namespace: BTreeMap<String, u64>,
}

impl UsageTally {
    /// Tallies subject, predicate and object IRIs of every triple.
    ///
    /// Each external occurrence is attributed to the longest declared prefix
    /// namespace it starts with (declared prefixes that are default or base
    /// namespaces are ignored), or to the IRI's own namespace when no
    /// declared prefix matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the accessor cannot list triples or prefixes.
    pub fn collect(
        accessor: &dyn GraphAccessor,
        classifier: &NamespaceClassifier,
    ) -> AccessorResult<Self> {
        let mut declared: Vec<String> = accessor
            .namespace_prefix_map()?
            .into_values()
            .filter(|ns| !ns.is_empty())
            .filter(|ns| classifier.classify(ns) == NamespaceClass::External)
            .collect();
        declared.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        declared.dedup();

        let mut tally = UsageTally::default();
        for triple in accessor.list_triples(None, None, None)? {
            for node in [&triple.subject, &triple.predicate, &triple.object] {
                if let Some(iri) = node.as_iri() {
                    tally.record(classifier, &declared, iri);
                }
            }
        }
        tracing::debug!(
            default = tally.default,
            internal = tally.internal,
            external = tally.external,
            namespaces = tally.per_namespace.len(),
            "resource usage tallied"
        );
        Ok(tally)
    }

    fn record(&mut self, classifier: &NamespaceClassifier, declared: &[String], iri: &str) {
        match classifier.classify(iri) {
            NamespaceClass::Default => self.default += 1,
            NamespaceClass::Internal => self.internal += 1,
            NamespaceClass::External => {
                self.external += 1;
                let namespace = declared
                    .iter()
                    .find(|ns| iri.starts_with(ns.as_str()))
                    .map_or_else(|| split_iri(iri).0, String::as_str);
                *self.per_namespace.entry(namespace.to_string()).or_default() += 1;
            }
        }
    }

    /// Total occurrences across all classes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.default + self.internal + self.external
    }
}
