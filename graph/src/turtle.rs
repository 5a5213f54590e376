//! Turtle 1.1 and N-Triples loading, and file loading by extension.
//!
//! Triples are parsed with `sophia_turtle` and copied into an owned
//! [`TripleStore`]. Prefix declarations are not part of the RDF data model, so
//! they are recovered with a line scan of the document (`@prefix`, `PREFIX`,
//! `@base`, `BASE`). The empty prefix, or failing that the base IRI, becomes
//! the ontology's base namespace. RDF/XML documents go through
//! [`crate::rdfxml`].

use std::collections::BTreeMap;
use std::path::Path;

use sophia_api::source::TripleSource;
use sophia_api::term::{Term, TermKind};
use sophia_turtle::parser::{nt, turtle};

use crate::accessor::{AccessorError, AccessorResult};
use crate::model::{Node, Triple};
use crate::store::TripleStore;

/// Parses a Turtle document into a [`TripleStore`].
///
/// # Errors
///
/// Returns [`AccessorError::Load`] if the document is not valid Turtle.
pub fn load_turtle(content: &str) -> AccessorResult<TripleStore> {
    load_turtle_named(content, "<string>")
}

/// Parses an N-Triples document into a [`TripleStore`].
///
/// # Errors
///
/// Returns [`AccessorError::Load`] if the document is not valid N-Triples.
pub fn load_ntriples(content: &str) -> AccessorResult<TripleStore> {
    load_ntriples_named(content, "<string>")
}

/// Reads and parses a file, choosing the syntax from its extension:
/// `.nt` is N-Triples, `.owl`, `.rdf` and `.xml` are RDF/XML, anything else
/// is Turtle.
///
/// # Errors
///
/// Returns [`AccessorError::Io`] if the file cannot be read and
/// [`AccessorError::Load`] if it cannot be parsed.
pub fn load_file(path: &Path) -> AccessorResult<TripleStore> {
    let content = std::fs::read_to_string(path).map_err(|source| AccessorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("nt") => load_ntriples_named(&content, &name),
        Some("owl" | "rdf" | "xml") => crate::rdfxml::load_rdfxml_named(&content, &name),
        _ => load_turtle_named(&content, &name),
    }
}

fn load_turtle_named(content: &str, name: &str) -> AccessorResult<TripleStore> {
    let mut triples = Vec::new();
    turtle::parse_str(content)
        .for_each_triple(|t| {
            if let Some(triple) = convert(&t) {
                triples.push(triple);
            }
        })
        .map_err(|e| AccessorError::Load {
            source_name: name.to_string(),
            message: e.to_string(),
        })?;
    Ok(finish(triples, scan_declarations(content), name))
}

fn load_ntriples_named(content: &str, name: &str) -> AccessorResult<TripleStore> {
    let mut triples = Vec::new();
    nt::parse_str(content)
        .for_each_triple(|t| {
            if let Some(triple) = convert(&t) {
                triples.push(triple);
            }
        })
        .map_err(|e| AccessorError::Load {
            source_name: name.to_string(),
            message: e.to_string(),
        })?;
    Ok(finish(triples, scan_declarations(content), name))
}

pub(crate) fn finish(
    triples: Vec<Triple>,
    declarations: Declarations,
    name: &str,
) -> TripleStore {
    tracing::info!(
        source = name,
        triples = triples.len(),
        prefixes = declarations.prefixes.len(),
        "ontology document loaded"
    );
    let store = TripleStore::new(triples).with_prefixes(declarations.prefixes);
    match declarations.base {
        Some(base) if !store_has_empty_prefix(&store) => store.with_base(base),
        _ => store,
    }
}

fn store_has_empty_prefix(store: &TripleStore) -> bool {
    use crate::accessor::GraphAccessor;
    store
        .namespace_prefix_map()
        .map(|m| m.contains_key(""))
        .unwrap_or(false)
}

pub(crate) fn convert<T: sophia_api::triple::Triple>(t: &T) -> Option<Triple> {
    Some(Triple::new(node_of(t.s())?, node_of(t.p())?, node_of(t.o())?))
}

fn node_of<T: Term>(term: T) -> Option<Node> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Node::Iri(iri.as_str().to_string())),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| Node::Blank(id.as_str().to_string())),
        TermKind::Literal => term.lexical_form().map(|lexical| Node::Literal {
            lexical: lexical.to_string(),
            datatype: term.datatype().map(|dt| dt.as_str().to_string()),
            language: term.language_tag().map(|tag| tag.as_str().to_string()),
        }),
        // RDF-star quoted triples and variables carry no ontology structure.
        _ => None,
    }
}

/// Prefix and base declarations found in an RDF document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Declarations {
    /// `prefix -> namespace IRI` (the empty prefix is `""`).
    pub prefixes: BTreeMap<String, String>,
    /// The last `@base`/`BASE` (or `xml:base`) IRI, if any.
    pub base: Option<String>,
}

/// Scans `@prefix`, `PREFIX`, `@base` and `BASE` lines.
///
/// Declarations must start a line (after optional whitespace); this matches
/// how serializers emit them and keeps the scan independent of the parser.
#[must_use]
pub fn scan_declarations(content: &str) -> Declarations {
    let mut out = Declarations::default();
    for line in content.lines() {
        let trimmed = line.trim_start();
        let lower = trimmed.get(..7).map(str::to_ascii_lowercase);
        if let Some(rest) = trimmed.strip_prefix("@prefix") {
            if let Some((prefix, iri)) = parse_prefix(rest) {
                out.prefixes.insert(prefix, iri);
            }
        } else if lower.as_deref() == Some("prefix ") {
            if let Some((prefix, iri)) = parse_prefix(&trimmed[6..]) {
                out.prefixes.insert(prefix, iri);
            }
        } else if let Some(rest) = trimmed.strip_prefix("@base") {
            out.base = bracketed(rest).or(out.base);
        } else if trimmed.get(..5).map(str::to_ascii_lowercase).as_deref() == Some("base ") {
            out.base = bracketed(&trimmed[4..]).or(out.base);
        }
    }
    out
}

fn parse_prefix(rest: &str) -> Option<(String, String)> {
    let (label, remainder) = rest.trim_start().split_once(':')?;
    let label = label.trim();
    if label.contains(char::is_whitespace) {
        return None;
    }
    Some((label.to_string(), bracketed(remainder)?))
}

fn bracketed(text: &str) -> Option<String> {
    let start = text.find('<')?;
    let end = start + text[start..].find('>')?;
    Some(text[start + 1..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_turtle_and_sparql_style_prefixes() {
        let doc = "@prefix : <http://example.org/pizza#> .\n\
                   @prefix owl:  <http://www.w3.org/2002/07/owl#> .\n\
                   PREFIX skos: <http://www.w3.org/2004/02/skos/core#>\n\
                   @base <http://example.org/pizza> .\n";
        let decl = scan_declarations(doc);
        assert_eq!(decl.prefixes.len(), 3);
        assert_eq!(
            decl.prefixes.get("").map(String::as_str),
            Some("http://example.org/pizza#")
        );
        assert_eq!(
            decl.prefixes.get("skos").map(String::as_str),
            Some("http://www.w3.org/2004/02/skos/core#")
        );
        assert_eq!(decl.base.as_deref(), Some("http://example.org/pizza"));
    }

    #[test]
    fn ignores_non_declarations() {
        let doc = "<http://a/x> <http://a/p> \"@prefix nope: <http://b/>\" .\n";
        assert_eq!(scan_declarations(doc), Declarations::default());
    }

    #[test]
    fn prefix_without_iri_is_skipped() {
        let decl = scan_declarations("@prefix broken: .\n");
        assert!(decl.prefixes.is_empty());
    }
}
