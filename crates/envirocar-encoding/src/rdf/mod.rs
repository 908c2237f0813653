//! RDF encoding: graph model, linkers and serializers.
//!
//! Encoding an entity builds one [`Graph`] by running the registered
//! linkers ([`Linked::link_into`]) and serializes it in the negotiated
//! syntax.

pub mod linker;
pub mod linkers;
pub mod model;
pub mod ntriples;
pub mod rdfxml;
pub mod turtle;
pub mod vocab;

pub use linker::{Linked, Linker, LinkerRegistry, LinkerSet};
pub use model::{Graph, Literal, LiteralKind, Term, Triple};

use crate::context::EncodeContext;
use crate::error::{Error, Result};
use crate::format::Format;

/// Builds the graph for a value.
pub fn graph<T: Linked + ?Sized>(
    value: &T,
    registry: &LinkerRegistry,
    ctx: &EncodeContext<'_>,
) -> Graph {
    let mut graph = Graph::with_default_prefixes();
    value.link_into(&mut graph, registry, ctx);
    graph
}

/// Serializes a graph in one of the RDF syntaxes.
pub fn serialize(graph: &Graph, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::RdfXml => rdfxml::write(graph),
        Format::Turtle => Ok(turtle::write(graph).into_bytes()),
        Format::NTriples => Ok(ntriples::write(graph).into_bytes()),
        other => Err(Error::unsupported_media_type(other.media_type().to_string())),
    }
}

/// Builds and serializes the graph for a value.
pub fn encode<T: Linked + ?Sized>(
    value: &T,
    registry: &LinkerRegistry,
    ctx: &EncodeContext<'_>,
    format: Format,
) -> Result<Vec<u8>> {
    serialize(&graph(value, registry, ctx), format)
}
