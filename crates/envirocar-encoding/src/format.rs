//! Output formats and `Accept` header negotiation.

use std::cmp::Ordering;
use std::fmt;

use crate::media::{
    MediaType, APPLICATION_JSON, APPLICATION_N_TRIPLES, APPLICATION_RDF_XML,
    APPLICATION_X_TURTLE, APPLICATION_ZIPPED_SHP, TEXT_TURTLE,
};

/// A serialization format an entity can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON (GeoJSON for tracks and measurements).
    Json,
    /// RDF/XML.
    RdfXml,
    /// Turtle.
    Turtle,
    /// N-Triples.
    NTriples,
    /// Zipped point Shapefile.
    Shapefile,
}

impl Format {
    /// Every format, in server preference order.
    pub const ALL: [Format; 5] = [
        Format::Json,
        Format::RdfXml,
        Format::Turtle,
        Format::NTriples,
        Format::Shapefile,
    ];

    /// The RDF formats.
    pub const RDF: [Format; 3] = [Format::RdfXml, Format::Turtle, Format::NTriples];

    /// Media types (essence only) served for this format; the first is canonical.
    pub fn media_types(&self) -> &'static [&'static str] {
        match self {
            Format::Json => &[APPLICATION_JSON],
            Format::RdfXml => &[APPLICATION_RDF_XML],
            Format::Turtle => &[TEXT_TURTLE, APPLICATION_X_TURTLE],
            Format::NTriples => &[APPLICATION_N_TRIPLES],
            Format::Shapefile => &[APPLICATION_ZIPPED_SHP],
        }
    }

    /// The canonical media type.
    pub fn media_type(&self) -> MediaType {
        parse_static(self.media_types()[0])
    }

    /// The format a media type selects, if any. Parameters are ignored.
    pub fn from_media_type(media_type: &MediaType) -> Option<Format> {
        if media_type.is_wildcard() {
            return None;
        }
        let essence = media_type.essence();
        Format::ALL
            .into_iter()
            .find(|f| f.media_types().contains(&essence.as_str()))
    }

    /// Whether this is one of the RDF formats.
    pub fn is_rdf(&self) -> bool {
        Format::RDF.contains(self)
    }

    /// Whether the output is binary.
    pub fn is_binary(&self) -> bool {
        *self == Format::Shapefile
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_types()[0])
    }
}

fn parse_static(s: &str) -> MediaType {
    MediaType::parse(s).unwrap_or_else(|_| MediaType::any())
}

/// One media range of an `Accept` header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptRange {
    /// The range, without the `q` parameter.
    pub media_type: MediaType,
    /// Quality, `0.0..=1.0`.
    pub quality: f32,
}

impl AcceptRange {
    fn specificity(&self) -> u8 {
        match (self.media_type.type_(), self.media_type.subtype()) {
            ("*", _) => 0,
            (_, "*") => 1,
            _ => 2 + u8::from(self.media_type.params().next().is_some()),
        }
    }
}

/// Parses an `Accept` header into ranges ordered by preference.
///
/// Unparsable ranges are skipped. Ranges with equal quality keep the more
/// specific one first, then source order.
pub fn parse_accept(header: &str) -> Vec<AcceptRange> {
    let mut ranges: Vec<AcceptRange> = header
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| MediaType::parse(s).ok())
        .map(|mt| {
            let quality = mt
                .param("q")
                .and_then(|q| q.parse::<f32>().ok())
                .filter(|q| (0.0..=1.0).contains(q))
                .unwrap_or(1.0);
            let mut media_type = MediaType::new(mt.type_(), mt.subtype());
            for (name, value) in mt.params().filter(|(n, _)| *n != "q") {
                media_type = media_type.with_param(name, value);
            }
            AcceptRange {
                media_type,
                quality,
            }
        })
        .collect();
    ranges.sort_by(|a, b| {
        b.quality
            .partial_cmp(&a.quality)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.specificity().cmp(&a.specificity()))
    });
    ranges
}

/// Outcome of a successful negotiation.
#[derive(Debug, Clone, PartialEq)]
pub struct Negotiated {
    /// Selected format.
    pub format: Format,
    /// Concrete media type to announce in `Content-Type`.
    pub media_type: MediaType,
}

/// Picks the best of `supported` (in server preference order) for an
/// `Accept` header.
///
/// A missing or empty header selects the first supported format. Returns
/// `None` when nothing acceptable is supported.
pub fn negotiate(accept: Option<&str>, supported: &[Format]) -> Option<Negotiated> {
    let ranges = match accept.map(str::trim) {
        None | Some("") => {
            let format = *supported.first()?;
            return Some(Negotiated {
                format,
                media_type: format.media_type(),
            });
        }
        Some(header) => parse_accept(header),
    };

    let excluded = |media_type: &MediaType| {
        ranges.iter().any(|r| {
            r.quality == 0.0 && !r.media_type.is_wildcard() && r.media_type.is_compatible(media_type)
        })
    };

    for range in ranges.iter().filter(|r| r.quality > 0.0) {
        for format in supported {
            for candidate in format.media_types() {
                let candidate = parse_static(candidate);
                if range.media_type.is_compatible(&candidate) && !excluded(&candidate) {
                    let media_type = if range.media_type.is_wildcard() {
                        candidate
                    } else {
                        range.media_type.clone()
                    };
                    return Some(Negotiated {
                        format: *format,
                        media_type,
                    });
                }
            }
        }
    }
    None
}
