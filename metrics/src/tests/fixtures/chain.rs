//! A single chain of five concepts.
//!
//! Expected: DIT = 5, one path, TM undefined, CBO = NOC = NAC = 1, INR = 0.8.

/// `Entity <- Agent <- Person <- Student <- Graduate`.
pub const CHAIN: &str = r#"
@prefix :     <http://example.org/chain#> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdf:  <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

<http://example.org/chain> a owl:Ontology .

:Entity   a owl:Class .
:Agent    a owl:Class ; rdfs:subClassOf :Entity .
:Person   a owl:Class ; rdfs:subClassOf :Agent .
:Student  a owl:Class ; rdfs:subClassOf :Person .
:Graduate a owl:Class ; rdfs:subClassOf :Student .
"#;
