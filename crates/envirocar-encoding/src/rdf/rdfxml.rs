//! RDF/XML writer.
//!
//! Emits one `rdf:Description` per subject in first-seen order. Predicates
//! must be expressible as QNames; namespaces without a bound prefix get a
//! generated `nsN` prefix.

use std::collections::HashMap;
use std::io;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::model::{Graph, LiteralKind, Term};
use super::vocab;
use crate::error::{Error, Result};

/// Namespace bindings used for one document.
struct Namespaces {
    bindings: Vec<(String, String)>,
    by_ns: HashMap<String, String>,
}

impl Namespaces {
    fn for_graph(graph: &Graph) -> Result<Self> {
        let mut ns = Self {
            bindings: Vec::new(),
            by_ns: HashMap::new(),
        };
        ns.bind(vocab::rdf::PREFIX, vocab::rdf::NS);
        for (prefix, namespace) in graph.prefixes() {
            ns.bind(prefix, namespace);
        }
        for triple in graph {
            if ns.qname(&triple.predicate).is_none() {
                let (namespace, _) = split_predicate(&triple.predicate).ok_or_else(|| {
                    Error::invalid_document(format!(
                        "predicate <{}> has no XML-compatible local name",
                        triple.predicate
                    ))
                })?;
                let prefix = format!("ns{}", ns.bindings.len());
                ns.bind(&prefix, namespace);
            }
        }
        Ok(ns)
    }

    fn bind(&mut self, prefix: &str, namespace: &str) {
        if !self.by_ns.contains_key(namespace) {
            self.by_ns.insert(namespace.to_string(), prefix.to_string());
            self.bindings.push((prefix.to_string(), namespace.to_string()));
        }
    }

    fn qname(&self, iri: &str) -> Option<String> {
        let (namespace, local) = split_predicate(iri)?;
        self.by_ns.get(namespace).map(|prefix| format!("{prefix}:{local}"))
    }
}

/// Splits an IRI after its last `#` or `/` when the remainder is a valid
/// XML local name.
fn split_predicate(iri: &str) -> Option<(&str, &str)> {
    let at = iri.rfind(['#', '/'])? + 1;
    let (namespace, local) = iri.split_at(at);
    let mut chars = local.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    chars
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .then_some((namespace, local))
}

fn emit<'a>(writer: &mut Writer<Vec<u8>>, event: impl Into<Event<'a>>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Io(io::Error::other(e)))
}

/// Serializes the graph as RDF/XML.
pub fn write(graph: &Graph) -> Result<Vec<u8>> {
    let namespaces = Namespaces::for_graph(graph)?;
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut root = BytesStart::new("rdf:RDF");
    for (prefix, namespace) in &namespaces.bindings {
        root.push_attribute((format!("xmlns:{prefix}").as_str(), namespace.as_str()));
    }
    emit(&mut writer, Event::Start(root))?;

    for subject in graph.subjects() {
        let mut description = BytesStart::new("rdf:Description");
        match subject {
            Term::Iri(iri) => description.push_attribute(("rdf:about", iri.as_str())),
            Term::Blank(label) => description.push_attribute(("rdf:nodeID", label.as_str())),
            Term::Literal(_) => {
                return Err(Error::invalid_document("literal in subject position"));
            }
        }
        emit(&mut writer, Event::Start(description))?;

        for triple in graph.about(subject) {
            // every predicate was bound in Namespaces::for_graph
            let Some(name) = namespaces.qname(&triple.predicate) else {
                continue;
            };
            let mut element = BytesStart::new(name.as_str());
            match &triple.object {
                Term::Iri(iri) => {
                    element.push_attribute(("rdf:resource", iri.as_str()));
                    emit(&mut writer, Event::Empty(element))?;
                }
                Term::Blank(label) => {
                    element.push_attribute(("rdf:nodeID", label.as_str()));
                    emit(&mut writer, Event::Empty(element))?;
                }
                Term::Literal(literal) => {
                    match &literal.kind {
                        LiteralKind::Plain => {}
                        LiteralKind::Lang(tag) => element.push_attribute(("xml:lang", tag.as_str())),
                        LiteralKind::Typed(dt) => {
                            element.push_attribute(("rdf:datatype", dt.as_str()))
                        }
                    }
                    emit(&mut writer, Event::Start(element))?;
                    emit(&mut writer, Event::Text(BytesText::new(&literal.lexical)))?;
                    emit(&mut writer, Event::End(BytesEnd::new(name.as_str())))?;
                }
            }
        }
        emit(&mut writer, Event::End(BytesEnd::new("rdf:Description")))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("rdf:RDF")))?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}
