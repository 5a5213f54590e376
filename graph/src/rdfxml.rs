//! RDF/XML loading.
//!
//! Triples are parsed with `sophia_xml`. Namespace declarations live in XML
//! attributes rather than on their own lines, so they are recovered by
//! scanning for `xmlns:prefix="..."`, `xmlns="..."` and `xml:base="..."`
//! wherever they occur. The default namespace plays the role of the Turtle
//! empty prefix.

use sophia_api::source::TripleSource;

use crate::accessor::{AccessorError, AccessorResult};
use crate::store::TripleStore;
use crate::turtle::{convert, finish, Declarations};

/// Parses an RDF/XML document into a [`TripleStore`].
///
/// # Errors
///
/// Returns [`AccessorError::Load`] if the document is not valid RDF/XML.
pub fn load_rdfxml(content: &str) -> AccessorResult<TripleStore> {
    load_rdfxml_named(content, "<string>")
}

pub(crate) fn load_rdfxml_named(content: &str, name: &str) -> AccessorResult<TripleStore> {
    let mut triples = Vec::new();
    sophia_xml::parser::parse_str(content)
        .for_each_triple(|t| {
            if let Some(triple) = convert(&t) {
                triples.push(triple);
            }
        })
        .map_err(|e| AccessorError::Load {
            source_name: name.to_string(),
            message: e.to_string(),
        })?;
    Ok(finish(triples, scan_xml_declarations(content), name))
}

/// Scans `xmlns`, `xmlns:prefix` and `xml:base` attributes.
///
/// Values that are entity references (`&owl;`) are skipped.
#[must_use]
pub fn scan_xml_declarations(content: &str) -> Declarations {
    let mut out = Declarations::default();
    let mut offset = 0;
    while let Some(found) = content[offset..].find("xml") {
        let at = offset + found;
        offset = at + 3;
        let preceded_by_space = content[..at]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if !preceded_by_space {
            continue;
        }
        let rest = &content[offset..];
        if let Some(after) = rest.strip_prefix("ns:") {
            if let Some((label, value)) = attribute(after) {
                if !label.is_empty() {
                    out.prefixes.insert(label.to_string(), value.to_string());
                }
            }
        } else if let Some(after) = rest.strip_prefix("ns") {
            if let Some(("", value)) = attribute(after) {
                out.prefixes.insert(String::new(), value.to_string());
            }
        } else if let Some(after) = rest.strip_prefix(":base") {
            if let Some(("", value)) = attribute(after) {
                out.base = Some(value.to_string());
            }
        }
    }
    out
}

/// Splits `label="value"` (either quote style) into its parts.
fn attribute(text: &str) -> Option<(&str, &str)> {
    let (label, rest) = text.split_once('=')?;
    if label.contains(|c: char| c.is_whitespace() || c == '<' || c == '>' || c == '"') {
        return None;
    }
    let rest = rest.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    let value = &value[..value.find(quote)?];
    if value.starts_with('&') {
        return None;
    }
    Some((label, value))
}
