//! A small zoo with multiple inheritance, restrictions, annotations and
//! individuals.
//!
//! Seven concepts under one root, seven subclass edges and four root-to-leaf
//! paths. `Bat` has two parents. Expected values: TM = 2, CBO = 7/6,
//! NOM = 3/7, RFC = 10/7, RR = 0.7, PR = 0.4, AN = 5/7, AR = 2/7, CR = 2/7.

/// The zoo ontology.
pub const ZOO: &str = r#"
@prefix :     <http://example.org/zoo#> .
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdf:  <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd:  <http://www.w3.org/2001/XMLSchema#> .

<http://example.org/zoo> a owl:Ontology ;
    owl:versionInfo "1.0" .

# Concepts

:Animal a owl:Class ;
    rdfs:label "Animal"@en ;
    rdfs:comment "Anything kept at the zoo." .

:Mammal a owl:Class ;
    rdfs:subClassOf :Animal ;
    rdfs:label "Mammal"@en .

:Bird a owl:Class ;
    rdfs:subClassOf :Animal .

:FlyingAnimal a owl:Class ;
    rdfs:subClassOf :Animal .

:Bat a owl:Class ;
    rdfs:subClassOf :Mammal , :FlyingAnimal ;
    rdfs:subClassOf [ owl:onProperty :eats ; owl:someValuesFrom :Animal ] ;
    rdfs:isDefinedBy <http://example.org/zoo> .

:Dog a owl:Class ;
    rdfs:subClassOf :Mammal .

:Eagle a owl:Class ;
    rdfs:subClassOf :Bird ;
    rdfs:subClassOf [ owl:onProperty :eats ; owl:allValuesFrom :Mammal ] ;
    rdfs:seeAlso <http://dbpedia.org/resource/Eagle> .

# Properties

:eats a owl:ObjectProperty ;
    rdfs:domain :Animal ;
    rdfs:range :Animal .

:name a owl:DatatypeProperty ;
    rdfs:domain :Animal .

:hasWingspan a owl:DatatypeProperty ;
    rdfs:domain :FlyingAnimal .

# Individuals

:rex a owl:NamedIndividual , :Dog ;
    :name "Rex" .

:luna a owl:NamedIndividual , :Bat ;
    :hasWingspan "0.3"^^xsd:decimal ;
    foaf:name "Luna" .
"#;
