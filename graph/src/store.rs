//! Indexed in-memory triple store.
//!
//! [`TripleStore`] is the default [`GraphAccessor`]: an immutable set of
//! triples with subject, predicate and object indexes, plus the prefix map
//! declared by the source document. OWL structure (classes, properties,
//! individuals) is read directly from the asserted triples; no reasoning is
//! performed.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::accessor::{AccessorResult, GraphAccessor};
use crate::model::iris::*;
use crate::model::{Concept, Individual, Node, Property, PropertyKind, RestrictionKind, Triple};

/// An immutable, indexed RDF graph.
#[derive(Debug, Default)]
pub struct TripleStore {
    triples: Vec<Triple>,
    by_subject: HashMap<Node, Vec<usize>>,
    by_predicate: HashMap<Node, Vec<usize>>,
    by_object: HashMap<Node, Vec<usize>>,
    prefixes: BTreeMap<String, String>,
    base: Option<String>,
    classes: BTreeSet<String>,
    object_properties: BTreeSet<String>,
    datatype_properties: BTreeSet<String>,
}

impl TripleStore {
    /// Builds a store from a set of triples. Duplicate triples are dropped.
    pub fn new(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut seen = HashSet::new();
        let mut store = TripleStore::default();
        for triple in triples {
            if !seen.insert(triple.clone()) {
                continue;
            }
            let idx = store.triples.len();
            store
                .by_subject
                .entry(triple.subject.clone())
                .or_default()
                .push(idx);
            store
                .by_predicate
                .entry(triple.predicate.clone())
                .or_default()
                .push(idx);
            store
                .by_object
                .entry(triple.object.clone())
                .or_default()
                .push(idx);
            store.triples.push(triple);
        }
        store.classes = store.typed_iris(&[OWL_CLASS, RDFS_CLASS]);
        store.classes.retain(|iri| !is_built_in(iri));
        store.object_properties = store.typed_iris(&[OWL_OBJECT_PROPERTY]);
        store.datatype_properties = store.typed_iris(&[OWL_DATATYPE_PROPERTY]);
        tracing::debug!(
            triples = store.triples.len(),
            classes = store.classes.len(),
            object_properties = store.object_properties.len(),
            datatype_properties = store.datatype_properties.len(),
            "triple store indexed"
        );
        store
    }

    /// Adds a namespace prefix declaration.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), namespace.into());
        self
    }

    /// Adds every prefix declaration from `prefixes`.
    #[must_use]
    pub fn with_prefixes(mut self, prefixes: BTreeMap<String, String>) -> Self {
        self.prefixes.extend(prefixes);
        self
    }

    /// Sets the base namespace explicitly, overriding the derived one.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the store holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates all triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    fn matching<'a>(
        &'a self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> Vec<&'a Triple> {
        // Scan the smallest bound index, then filter on the remaining terms.
        let candidates: Option<&Vec<usize>> = [
            subject.map(|s| self.by_subject.get(s)),
            predicate.map(|p| self.by_predicate.get(p)),
            object.map(|o| self.by_object.get(o)),
        ]
        .into_iter()
        .flatten()
        .map(|hit| hit.unwrap_or(&EMPTY))
        .min_by_key(|idx| idx.len());

        let accept = |t: &Triple| {
            subject.map_or(true, |s| &t.subject == s)
                && predicate.map_or(true, |p| &t.predicate == p)
                && object.map_or(true, |o| &t.object == o)
        };

        match candidates {
            Some(indices) => indices
                .iter()
                .map(|&i| &self.triples[i])
                .filter(|t| accept(t))
                .collect(),
            None => self.triples.iter().collect(),
        }
    }

    fn objects(&self, subject: &Node, predicate: &str) -> Vec<&Node> {
        self.matching(Some(subject), Some(&Node::iri(predicate)), None)
            .into_iter()
            .map(|t| &t.object)
            .collect()
    }

    fn subjects(&self, predicate: &str, object: &Node) -> Vec<&Node> {
        self.matching(None, Some(&Node::iri(predicate)), Some(object))
            .into_iter()
            .map(|t| &t.subject)
            .collect()
    }

    fn has(&self, subject: &Node, predicate: &str, object: &Node) -> bool {
        !self
            .matching(Some(subject), Some(&Node::iri(predicate)), Some(object))
            .is_empty()
    }

    fn typed_iris(&self, types: &[&str]) -> BTreeSet<String> {
        types
            .iter()
            .flat_map(|ty| self.subjects(RDF_TYPE, &Node::iri(*ty)))
            .filter_map(|n| n.as_iri().map(str::to_string))
            .collect()
    }

    fn is_named_class(&self, node: &Node) -> bool {
        node.as_iri().is_some_and(|iri| self.classes.contains(iri))
    }

    /// Members of an `rdf:List`, stopping at `rdf:nil` or on a revisited cell.
    fn list_members(&self, head: &Node) -> Vec<Node> {
        let nil = Node::iri(RDF_NIL);
        let mut members = Vec::new();
        let mut visited = HashSet::new();
        let mut cell = head.clone();
        while cell != nil && visited.insert(cell.clone()) {
            members.extend(self.objects(&cell, RDF_FIRST).into_iter().cloned());
            match self.objects(&cell, RDF_REST).first() {
                Some(next) => cell = (*next).clone(),
                None => break,
            }
        }
        members
    }

    /// Named classes a property's `rdfs:domain` covers, expanding `owl:unionOf`.
    fn domain_classes(&self, property: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for domain in self.objects(&Node::iri(property), RDFS_DOMAIN) {
            if self.is_named_class(domain) {
                if let Some(iri) = domain.as_iri() {
                    out.insert(iri.to_string());
                }
                continue;
            }
            for union in self.objects(domain, OWL_UNION_OF) {
                for member in self.list_members(union) {
                    if let Some(iri) = member.as_iri().filter(|_| self.is_named_class(&member)) {
                        out.insert(iri.to_string());
                    }
                }
            }
        }
        out
    }

    fn all_properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.object_properties
            .iter()
            .map(|iri| Property::new(iri.clone(), PropertyKind::Object))
            .chain(
                self.datatype_properties
                    .iter()
                    .map(|iri| Property::new(iri.clone(), PropertyKind::Datatype)),
            )
    }

    /// Transitive named ancestors of `concept`, excluding `concept` itself.
    fn ancestors(&self, concept: &Concept) -> BTreeSet<Concept> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<Concept> = VecDeque::from([concept.clone()]);
        while let Some(next) = queue.pop_front() {
            for parent in self.named_neighbours(&next.node(), Direction::Up) {
                if parent != *concept && seen.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }
        seen
    }

    fn named_neighbours(&self, node: &Node, direction: Direction) -> Vec<Concept> {
        let hits = match direction {
            Direction::Up => self.objects(node, RDFS_SUBCLASS_OF),
            Direction::Down => self.subjects(RDFS_SUBCLASS_OF, node),
        };
        let set: BTreeSet<Concept> = hits
            .into_iter()
            .filter(|n| self.is_named_class(n))
            .filter_map(|n| n.as_iri().map(Concept::new))
            .collect();
        set.into_iter().collect()
    }

    fn ontology_namespace(&self) -> Option<String> {
        let ontology = self
            .subjects(RDF_TYPE, &Node::iri(OWL_ONTOLOGY))
            .into_iter()
            .find_map(|n| n.as_iri())?;
        if ontology.ends_with('#') || ontology.ends_with('/') {
            Some(ontology.to_string())
        } else {
            Some(format!("{}#", ontology))
        }
    }
}

static EMPTY: Vec<usize> = Vec::new();

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

impl GraphAccessor for TripleStore {
    fn list_named_classes(&self) -> AccessorResult<Vec<Concept>> {
        Ok(self.classes.iter().map(Concept::new).collect())
    }

    fn direct_superclasses(&self, concept: &Concept) -> AccessorResult<Vec<Concept>> {
        Ok(self.named_neighbours(&concept.node(), Direction::Up))
    }

    fn direct_subclasses(&self, concept: &Concept) -> AccessorResult<Vec<Concept>> {
        Ok(self.named_neighbours(&concept.node(), Direction::Down))
    }

    fn superclass_expressions(&self, concept: &Concept) -> AccessorResult<Vec<Node>> {
        let set: BTreeSet<Node> = self
            .objects(&concept.node(), RDFS_SUBCLASS_OF)
            .into_iter()
            .cloned()
            .collect();
        Ok(set.into_iter().collect())
    }

    fn hierarchy_roots(&self) -> AccessorResult<Vec<Concept>> {
        Ok(self
            .classes
            .iter()
            .map(Concept::new)
            .filter(|c| self.named_neighbours(&c.node(), Direction::Up).is_empty())
            .collect())
    }

    fn declared_properties(
        &self,
        concept: &Concept,
        direct: bool,
    ) -> AccessorResult<Vec<Property>> {
        let mut targets = BTreeSet::from([concept.iri.clone()]);
        if !direct {
            targets.extend(self.ancestors(concept).into_iter().map(|c| c.iri));
        }
        Ok(self
            .all_properties()
            .filter(|p| !self.domain_classes(&p.iri).is_disjoint(&targets))
            .collect())
    }

    fn list_object_properties(&self) -> AccessorResult<Vec<Property>> {
        Ok(self
            .all_properties()
            .filter(|p| p.kind == PropertyKind::Object)
            .collect())
    }

    fn list_datatype_properties(&self) -> AccessorResult<Vec<Property>> {
        Ok(self
            .all_properties()
            .filter(|p| p.kind == PropertyKind::Datatype)
            .collect())
    }

    fn list_individuals(&self) -> AccessorResult<Vec<Individual>> {
        let named = Node::iri(OWL_NAMED_INDIVIDUAL);
        let set: BTreeSet<Individual> = self
            .matching(None, Some(&Node::iri(RDF_TYPE)), None)
            .into_iter()
            .filter(|t| t.object == named || self.is_named_class(&t.object))
            .filter_map(|t| t.subject.as_iri().map(Individual::new))
            .collect();
        Ok(set.into_iter().collect())
    }

    fn direct_instances(&self, concept: &Concept) -> AccessorResult<Vec<Individual>> {
        let set: BTreeSet<Individual> = self
            .subjects(RDF_TYPE, &concept.node())
            .into_iter()
            .filter_map(|n| n.as_iri().map(Individual::new))
            .collect();
        Ok(set.into_iter().collect())
    }

    fn list_triples(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> AccessorResult<Vec<Triple>> {
        Ok(self
            .matching(subject, predicate, object)
            .into_iter()
            .cloned()
            .collect())
    }

    fn namespace_prefix_map(&self) -> AccessorResult<BTreeMap<String, String>> {
        Ok(self.prefixes.clone())
    }

    fn base_namespace(&self) -> AccessorResult<Option<String>> {
        Ok(self
            .base
            .clone()
            .or_else(|| self.prefixes.get("").cloned())
            .or_else(|| self.ontology_namespace()))
    }

    fn restriction_kind(&self, expr: &Node) -> AccessorResult<RestrictionKind> {
        let is_restriction = !self.objects(expr, OWL_ON_PROPERTY).is_empty()
            || self.has(expr, RDF_TYPE, &Node::iri(OWL_RESTRICTION));
        if !is_restriction {
            return Ok(RestrictionKind::None);
        }
        let kinds = [
            (OWL_SOME_VALUES_FROM, RestrictionKind::SomeValuesFrom),
            (OWL_ALL_VALUES_FROM, RestrictionKind::AllValuesFrom),
            (OWL_HAS_VALUE, RestrictionKind::HasValue),
            (OWL_MIN_CARDINALITY, RestrictionKind::MinCardinality),
            (OWL_MAX_CARDINALITY, RestrictionKind::MaxCardinality),
        ];
        Ok(kinds
            .into_iter()
            .find(|(predicate, _)| !self.objects(expr, predicate).is_empty())
            .map_or(RestrictionKind::None, |(_, kind)| kind))
    }
}
