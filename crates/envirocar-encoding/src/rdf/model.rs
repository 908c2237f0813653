//! In-process RDF graph.
//!
//! A [`Graph`] is a de-duplicated, insertion-ordered set of triples plus the
//! namespace prefixes the writers use for compact output. Insertion order is
//! kept so that encoding the same entity twice yields byte-identical output.

use std::collections::HashMap;
use std::fmt;

use indexmap::{IndexMap, IndexSet};

use super::vocab;

// ============================================================================
// Terms
// ============================================================================

/// The flavour of a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// A plain string.
    Plain,
    /// A string with a language tag.
    Lang(String),
    /// A value with a datatype IRI.
    Typed(String),
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Lexical form.
    pub lexical: String,
    /// Plain, language-tagged or typed.
    pub kind: LiteralKind,
}

impl Literal {
    /// A plain literal.
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            kind: LiteralKind::Plain,
        }
    }

    /// A literal with a datatype.
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            kind: LiteralKind::Typed(datatype.into()),
        }
    }

    /// A language-tagged literal.
    pub fn lang(lexical: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            kind: LiteralKind::Lang(tag.into()),
        }
    }

    /// An `xsd:double` literal.
    pub fn double(value: f64) -> Self {
        Self::typed(format_double(value), vocab::xsd::DOUBLE)
    }

    /// An `xsd:dateTime` literal.
    pub fn date_time(lexical: impl Into<String>) -> Self {
        Self::typed(lexical, vocab::xsd::DATE_TIME)
    }

    /// An `xsd:boolean` literal.
    pub fn boolean(value: bool) -> Self {
        Self::typed(value.to_string(), vocab::xsd::BOOLEAN)
    }
}

/// Formats a double the way it round-trips: integral values keep a `.0`.
fn format_double(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// A node of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An absolute IRI.
    Iri(String),
    /// A blank node, identified by a graph-local label.
    Blank(String),
    /// A literal.
    Literal(Literal),
}

impl Term {
    /// An IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// A plain literal term.
    pub fn plain(lexical: impl Into<String>) -> Self {
        Term::Literal(Literal::plain(lexical))
    }

    /// The IRI, if this is an IRI term.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The literal, if this is a literal term.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// Whether this is a blank node.
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }
}

impl From<&url::Url> for Term {
    fn from(url: &url::Url) -> Self {
        Term::Iri(url.as_str().to_string())
    }
}

impl From<url::Url> for Term {
    fn from(url: url::Url) -> Self {
        Term::Iri(url.into())
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl fmt::Display for Term {
    /// N-Triples syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", escape_iri(iri)),
            Term::Blank(label) => write!(f, "_:{label}"),
            Term::Literal(l) => {
                write!(f, "\"{}\"", escape_string(&l.lexical))?;
                match &l.kind {
                    LiteralKind::Plain => Ok(()),
                    LiteralKind::Lang(tag) => write!(f, "@{tag}"),
                    LiteralKind::Typed(dt) => write!(f, "^^<{}>", escape_iri(dt)),
                }
            }
        }
    }
}

/// Escapes a string for a quoted N-Triples or Turtle literal.
pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Escapes the characters that may not appear inside `<...>`.
pub(crate) fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                out.push_str(&format!("\\u{:04X}", c as u32))
            }
            c if (c as u32) <= 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

// ============================================================================
// Triples and graphs
// ============================================================================

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// IRI or blank node.
    pub subject: Term,
    /// Predicate IRI.
    pub predicate: String,
    /// Any term.
    pub object: Term,
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} .",
            self.subject,
            escape_iri(&self.predicate),
            self.object
        )
    }
}

/// A set of triples with namespace prefixes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    prefixes: IndexMap<String, String>,
    triples: IndexSet<Triple>,
    next_blank: usize,
}

impl Graph {
    /// An empty graph without prefixes.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty graph with the `rdf` and `xsd` prefixes bound.
    pub fn with_default_prefixes() -> Self {
        let mut graph = Self::new();
        graph.set_prefix(vocab::rdf::PREFIX, vocab::rdf::NS);
        graph.set_prefix(vocab::xsd::PREFIX, vocab::xsd::NS);
        graph
    }

    /// Binds a prefix, replacing any earlier binding of the same prefix.
    pub fn set_prefix(&mut self, prefix: &str, namespace: &str) {
        self.prefixes
            .insert(prefix.to_string(), namespace.to_string());
    }

    /// Bound prefixes in binding order.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// Adds a triple. Returns `false` if it was already present.
    pub fn add(&mut self, subject: impl Into<Term>, predicate: &str, object: impl Into<Term>) -> bool {
        self.insert(Triple {
            subject: subject.into(),
            predicate: predicate.to_string(),
            object: object.into(),
        })
    }

    /// Adds a triple value.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Adds `subject rdf:type class`.
    pub fn add_type(&mut self, subject: impl Into<Term>, class: &str) -> bool {
        self.add(subject, vocab::rdf::TYPE, Term::iri(class))
    }

    /// Adds a plain literal.
    pub fn add_literal(
        &mut self,
        subject: impl Into<Term>,
        predicate: &str,
        lexical: impl Into<String>,
    ) -> bool {
        self.add(subject, predicate, Term::plain(lexical))
    }

    /// Allocates a fresh blank node.
    pub fn blank(&mut self) -> Term {
        let label = format!("b{}", self.next_blank);
        self.next_blank += 1;
        Term::Blank(label)
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph has no triples.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Whether the graph contains the triple.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Whether any triple uses the predicate.
    pub fn has_predicate(&self, predicate: &str) -> bool {
        self.triples.iter().any(|t| t.predicate == predicate)
    }

    /// Triples about a subject, in insertion order.
    pub fn about<'a>(&'a self, subject: &'a Term) -> impl Iterator<Item = &'a Triple> {
        self.triples.iter().filter(move |t| &t.subject == subject)
    }

    /// Distinct subjects in first-seen order.
    pub fn subjects(&self) -> Vec<&Term> {
        let mut seen: IndexSet<&Term> = IndexSet::new();
        for t in &self.triples {
            seen.insert(&t.subject);
        }
        seen.into_iter().collect()
    }

    /// Splits an IRI into a bound prefix and a local name, if one fits.
    ///
    /// The local name must be a simple name (letters, digits, `_`, `-`,
    /// not starting with a digit or `-`) so the result is valid in both
    /// Turtle and XML.
    pub fn compact<'a>(&'a self, iri: &'a str) -> Option<(&'a str, &'a str)> {
        self.prefixes
            .iter()
            .filter_map(|(prefix, ns)| {
                let local = iri.strip_prefix(ns.as_str())?;
                is_simple_name(local).then_some((prefix.as_str(), local))
            })
            .max_by_key(|(prefix, _)| self.prefixes.get(*prefix).map_or(0, String::len))
    }

    /// Whether both graphs are equal up to a renaming of blank nodes.
    ///
    /// Blank nodes are labelled by iteratively refining a signature built
    /// from their ground neighbourhood; the graphs are isomorphic when
    /// their relabelled triple sets coincide.
    pub fn is_isomorphic(&self, other: &Graph) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut left: Vec<String> = self.canonical_triples();
        let mut right: Vec<String> = other.canonical_triples();
        left.sort();
        right.sort();
        left == right
    }

    fn canonical_triples(&self) -> Vec<String> {
        let labels = self.blank_labels();
        let show = |term: &Term| match term {
            Term::Blank(label) => format!("_:{}", labels.get(label).map_or("", String::as_str)),
            other => other.to_string(),
        };
        self.triples
            .iter()
            .map(|t| format!("{} <{}> {}", show(&t.subject), t.predicate, show(&t.object)))
            .collect()
    }

    fn blank_labels(&self) -> HashMap<String, String> {
        let mut labels: HashMap<String, String> = HashMap::new();
        for t in &self.triples {
            for term in [&t.subject, &t.object] {
                if let Term::Blank(label) = term {
                    labels.insert(label.clone(), String::new());
                }
            }
        }
        // Each round folds the neighbours' previous labels into the
        // signature; the number of distinct labels only grows.
        for _ in 0..labels.len().clamp(1, 8) {
            let mut next: HashMap<String, String> = HashMap::new();
            for node in labels.keys() {
                let mut signature: Vec<String> = Vec::new();
                for t in &self.triples {
                    if matches!(&t.subject, Term::Blank(l) if l == node) {
                        signature.push(format!("+{} {}", t.predicate, neighbour(&t.object, &labels)));
                    }
                    if matches!(&t.object, Term::Blank(l) if l == node) {
                        signature.push(format!("-{} {}", t.predicate, neighbour(&t.subject, &labels)));
                    }
                }
                signature.sort();
                next.insert(node.clone(), signature.join("|"));
            }
            labels = next;
        }
        labels
    }
}

fn neighbour(term: &Term, labels: &HashMap<String, String>) -> String {
    match term {
        Term::Blank(label) => format!("_[{}]", labels.get(label).map_or("", String::as_str)),
        other => other.to_string(),
    }
}

fn is_simple_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
