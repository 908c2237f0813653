//! Media types.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// `application/json`
pub const APPLICATION_JSON: &str = "application/json";
/// `application/rdf+xml`
pub const APPLICATION_RDF_XML: &str = "application/rdf+xml";
/// `text/turtle`
pub const TEXT_TURTLE: &str = "text/turtle";
/// `application/x-turtle`, the legacy Turtle type
pub const APPLICATION_X_TURTLE: &str = "application/x-turtle";
/// `application/n-triples`
pub const APPLICATION_N_TRIPLES: &str = "application/n-triples";
/// `application/x-zipped-shp`
pub const APPLICATION_ZIPPED_SHP: &str = "application/x-zipped-shp";

/// Parameter naming the JSON schema a document follows.
pub const SCHEMA_PARAMETER: &str = "schema";

/// A parsed media type: `type/subtype; name=value; ...`.
///
/// Type, subtype and parameter names are lower-cased; parameter values
/// keep their case with surrounding quotes removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    type_: String,
    subtype: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    /// Creates a media type without parameters.
    pub fn new(type_: &str, subtype: &str) -> Self {
        Self {
            type_: type_.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            params: Vec::new(),
        }
    }

    /// `*/*`
    pub fn any() -> Self {
        Self::new("*", "*")
    }

    /// Parses a media type.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split(';');
        let essence = parts.next().unwrap_or_default().trim();
        let (type_, subtype) = essence
            .split_once('/')
            .ok_or_else(|| Error::invalid_media_type(s, "missing '/'"))?;
        let (type_, subtype) = (type_.trim(), subtype.trim());
        if type_.is_empty() || subtype.is_empty() {
            return Err(Error::invalid_media_type(s, "empty type or subtype"));
        }
        if type_ == "*" && subtype != "*" {
            return Err(Error::invalid_media_type(s, "wildcard type with concrete subtype"));
        }

        let mut media_type = Self::new(type_, subtype);
        for param in parts {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let (name, value) = param
                .split_once('=')
                .ok_or_else(|| Error::invalid_media_type(s, format!("parameter '{param}' has no value")))?;
            let value = value.trim().trim_matches('"');
            media_type = media_type.with_param(name.trim(), value);
        }
        Ok(media_type)
    }

    /// Adds or replaces a parameter.
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        let name = name.to_ascii_lowercase();
        self.params.retain(|(n, _)| *n != name);
        self.params.push((name, value.to_string()));
        self
    }

    /// Primary type, e.g. `application`.
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// Subtype, e.g. `json`.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Value of a parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All parameters in source order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }

    /// The same type without parameters.
    pub fn without_params(&self) -> Self {
        Self::new(&self.type_, &self.subtype)
    }

    /// Whether either side is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.type_ == "*" || self.subtype == "*"
    }

    /// Whether the two types are compatible, treating `*` as a wildcard and
    /// ignoring parameters.
    pub fn is_compatible(&self, other: &MediaType) -> bool {
        let type_ok = self.type_ == "*" || other.type_ == "*" || self.type_ == other.type_;
        let subtype_ok =
            self.subtype == "*" || other.subtype == "*" || self.subtype == other.subtype;
        type_ok && subtype_ok
    }

    /// Whether this is `application/json`, with or without parameters.
    pub fn is_json(&self) -> bool {
        self.type_ == "application" && (self.subtype == "json" || self.subtype.ends_with("+json"))
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for (name, value) in &self.params {
            let needs_quotes = value
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, ';' | ',' | '"' | '='));
            if needs_quotes {
                write!(f, "; {name}=\"{}\"", value.replace('"', "\\\""))?;
            } else {
                write!(f, "; {name}={value}")?;
            }
        }
        Ok(())
    }
}
