//! N-Triples writer and reader.

use super::model::{Graph, Literal, Term, Triple};
use crate::error::{Error, Result};

/// Serializes the graph as N-Triples, one triple per line in insertion
/// order.
pub fn write(graph: &Graph) -> String {
    let mut out = String::new();
    for triple in graph {
        out.push_str(&triple.to_string());
        out.push('\n');
    }
    out
}

/// Parses an N-Triples document.
///
/// Blank node labels are kept as written, so the result is isomorphic (not
/// necessarily equal) to the graph that produced the document.
pub fn parse(input: &str) -> Result<Graph> {
    let mut graph = Graph::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut cursor = Cursor {
            rest: line,
            line: i + 1,
        };
        let subject = cursor.term()?;
        if matches!(subject, Term::Literal(_)) {
            return Err(cursor.error("subject must not be a literal"));
        }
        let predicate = match cursor.term()? {
            Term::Iri(iri) => iri,
            _ => return Err(cursor.error("predicate must be an IRI")),
        };
        let object = cursor.term()?;
        cursor.skip_ws();
        if cursor.rest != "." {
            return Err(cursor.error("expected '.' at end of triple"));
        }
        graph.insert(Triple {
            subject,
            predicate,
            object,
        });
    }
    Ok(graph)
}

struct Cursor<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn error(&self, message: &str) -> Error {
        Error::parse(self.line, message)
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn term(&mut self) -> Result<Term> {
        self.skip_ws();
        if let Some(rest) = self.rest.strip_prefix('<') {
            self.rest = rest;
            Ok(Term::Iri(self.iri_body()?))
        } else if let Some(rest) = self.rest.strip_prefix("_:") {
            let end = rest
                .find(|c: char| c.is_whitespace())
                .unwrap_or(rest.len());
            if end == 0 {
                return Err(self.error("empty blank node label"));
            }
            self.rest = &rest[end..];
            Ok(Term::Blank(rest[..end].to_string()))
        } else if let Some(rest) = self.rest.strip_prefix('"') {
            self.rest = rest;
            self.literal()
        } else {
            Err(self.error("expected a term"))
        }
    }

    /// Reads up to the closing `>`, which has already been opened.
    fn iri_body(&mut self) -> Result<String> {
        let end = self
            .rest
            .find('>')
            .ok_or_else(|| self.error("unterminated IRI"))?;
        let iri = unescape(&self.rest[..end]).map_err(|m| self.error(&m))?;
        self.rest = &self.rest[end + 1..];
        Ok(iri)
    }

    fn literal(&mut self) -> Result<Term> {
        let mut end = None;
        let mut escaped = false;
        for (i, c) in self.rest.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    end = Some(i);
                    break;
                }
                _ => {}
            }
        }
        let end = end.ok_or_else(|| self.error("unterminated literal"))?;
        let lexical = unescape(&self.rest[..end]).map_err(|m| self.error(&m))?;
        self.rest = &self.rest[end + 1..];

        if let Some(rest) = self.rest.strip_prefix("^^<") {
            self.rest = rest;
            let datatype = self.iri_body()?;
            Ok(Literal::typed(lexical, datatype).into())
        } else if let Some(rest) = self.rest.strip_prefix('@') {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(rest.len());
            if end == 0 {
                return Err(self.error("empty language tag"));
            }
            self.rest = &rest[end..];
            Ok(Literal::lang(lexical, &rest[..end]).into())
        } else {
            Ok(Literal::plain(lexical).into())
        }
    }
}

fn unescape(s: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(u @ ('u' | 'U')) => {
                let len = if u == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(len).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == len)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid escape \\{u}{hex}"))?;
                out.push(decoded);
            }
            Some(other) => return Err(format!("invalid escape \\{other}")),
            None => return Err("dangling backslash".to_string()),
        }
    }
    Ok(out)
}
