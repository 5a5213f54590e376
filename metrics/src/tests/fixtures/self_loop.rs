//! A leaf asserted as its own subclass.
//!
//! Expected: one path `Root -> Mid -> Leaf` (DIT = 3, WMC = 1), NAC = 1, no
//! tangled concepts, and one malformed-hierarchy diagnostic for the
//! `Leaf -> Leaf` edge.

/// `Leaf` is a subclass of `Mid` and of itself.
pub const SELF_LOOP: &str = r#"
@prefix :     <http://example.org/selfloop#> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

:Root a owl:Class .
:Mid  a owl:Class ; rdfs:subClassOf :Root .
:Leaf a owl:Class ; rdfs:subClassOf :Mid , :Leaf .
"#;
