//! # envirocar-encoding
//!
//! Content-negotiated representations of the enviroCar entities.
//!
//! # Modules
//!
//! - [`format`]: output formats and `Accept` negotiation
//! - [`media`]: media type parsing
//! - [`context`]: the per-call [`EncodeContext`]
//! - [`json`]: JSON encoders and request body decoders
//! - [`rdf`]: graph model, linkers, RDF/XML, Turtle and N-Triples
//! - [`shapefile`]: zipped point shapefile export of tracks
//! - [`writer`]: per-entity encode function tables used by the REST layer
//! - [`uri`]: resource URI construction
//! - [`error`]: Error types and Result alias

pub mod context;
pub mod error;
pub mod format;
pub mod json;
pub mod media;
pub mod rdf;
pub mod shapefile;
pub mod uri;
pub mod writer;

#[cfg(test)]
mod testing;

pub use context::EncodeContext;
pub use error::{Error, Result};
pub use format::{negotiate, Format, Negotiated};
pub use media::MediaType;
pub use rdf::{Linked, Linker, LinkerRegistry, LinkerSet};
pub use shapefile::ShapefileEncoder;
pub use uri::LinkBuilder;
pub use writer::{Backends, EncodeFn, EntityWriter, EntityWriters, Writable};
