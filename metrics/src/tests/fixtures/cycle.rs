//! A hierarchy with a self-referential subclass edge.
//!
//! Expected: one path `Root -> Looped -> Leaf` (DIT = 3) and a single
//! malformed-hierarchy diagnostic for the `Looped -> Looped` edge. `Looped`
//! has `Root` as its only parent, so TM is undefined.

/// `Looped` is asserted as its own subclass.
pub const CYCLE: &str = r#"
@prefix :     <http://example.org/cycle#> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

:Root   a owl:Class .
:Looped a owl:Class ; rdfs:subClassOf :Root , :Looped .
:Leaf   a owl:Class ; rdfs:subClassOf :Looped .
"#;
