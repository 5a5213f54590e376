//! Two concepts that are each other's parent, so no concept is a root.
//!
//! Expected: no paths (DIT, LCOM undefined) with a missing-root diagnostic,
//! CBO = 2 / 2 = 1.

/// `A <-> B` mutual subsumption.
pub const ROOTLESS: &str = r#"
@prefix :     <http://example.org/rootless#> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

:A a owl:Class ; rdfs:subClassOf :B .
:B a owl:Class ; rdfs:subClassOf :A .
"#;
