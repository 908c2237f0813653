//! Turtle writer.
//!
//! Triples are grouped by subject, then by predicate, both in first-seen
//! order; IRIs are shortened with the graph's prefixes wherever the local
//! name allows it.

use std::fmt::Write as _;

use super::model::{escape_iri, escape_string, Graph, LiteralKind, Term};
use super::vocab;

fn iri(graph: &Graph, iri: &str) -> String {
    match graph.compact(iri) {
        Some((prefix, local)) => format!("{prefix}:{local}"),
        None => format!("<{}>", escape_iri(iri)),
    }
}

fn term(graph: &Graph, t: &Term) -> String {
    match t {
        Term::Iri(i) => iri(graph, i),
        Term::Blank(label) => format!("_:{label}"),
        Term::Literal(l) => {
            let quoted = format!("\"{}\"", escape_string(&l.lexical));
            match &l.kind {
                LiteralKind::Plain => quoted,
                LiteralKind::Lang(tag) => format!("{quoted}@{tag}"),
                LiteralKind::Typed(dt) => format!("{quoted}^^{}", iri(graph, dt)),
            }
        }
    }
}

fn predicate(graph: &Graph, p: &str) -> String {
    if p == vocab::rdf::TYPE {
        "a".to_string()
    } else {
        iri(graph, p)
    }
}

/// Serializes the graph as Turtle.
pub fn write(graph: &Graph) -> String {
    let mut out = String::new();
    for (prefix, ns) in graph.prefixes() {
        let _ = writeln!(out, "@prefix {prefix}: <{}> .", escape_iri(ns));
    }

    for subject in graph.subjects() {
        out.push('\n');
        out.push_str(&term(graph, subject));

        // predicate -> objects, first-seen order
        let mut grouped: indexmap::IndexMap<&str, Vec<&Term>> = indexmap::IndexMap::new();
        for t in graph.about(subject) {
            grouped.entry(t.predicate.as_str()).or_default().push(&t.object);
        }

        let count = grouped.len();
        for (i, (p, objects)) in grouped.into_iter().enumerate() {
            let objects: Vec<String> = objects.into_iter().map(|o| term(graph, o)).collect();
            let _ = write!(out, "\n    {} {}", predicate(graph, p), objects.join(" , "));
            out.push_str(if i + 1 == count { " ." } else { " ;" });
        }
        out.push('\n');
    }
    out
}
