//! Entity writers: the bridge between content negotiation and encoders.
//!
//! Each entity type has an [`EntityWriter`] listing one encode function per
//! supported [`Format`]. The writers for all types live in
//! [`EntityWriters`], built once at startup together with the linker
//! registry and the shapefile encoder they use.

use std::fmt;
use std::io::Write;

use envirocar_core::{
    Fueling, Fuelings, Group, Groups, Measurement, Measurements, Phenomena, Phenomenon, Track,
    TrackDetails, Tracks, User, Users,
};
use serde_json::Value;

use crate::context::EncodeContext;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::json;
use crate::media::MediaType;
use crate::rdf::{self, Linked, LinkerRegistry};
use crate::shapefile::ShapefileEncoder;

/// Shared, read-only machinery the encode functions draw on.
#[derive(Debug, Default)]
pub struct Backends {
    /// RDF linkers.
    pub linkers: LinkerRegistry,
    /// Shapefile export.
    pub shapefile: ShapefileEncoder,
}

/// Encodes one value in one format.
pub type EncodeFn<T> = fn(&T, &EncodeContext<'_>, &Backends) -> Result<Vec<u8>>;

// ============================================================================
// EntityWriter
// ============================================================================

/// Encode functions for one entity type, in server preference order.
pub struct EntityWriter<T> {
    entity: &'static str,
    encoders: Vec<(Format, EncodeFn<T>)>,
}

impl<T> EntityWriter<T> {
    /// A writer without formats.
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            encoders: Vec::new(),
        }
    }

    /// Registers the encode function for a format.
    pub fn with(mut self, format: Format, encode: EncodeFn<T>) -> Self {
        self.encoders.retain(|(f, _)| *f != format);
        self.encoders.push((format, encode));
        self
    }

    /// Name of the entity type, for logs.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Supported formats in preference order.
    pub fn formats(&self) -> Vec<Format> {
        self.encoders.iter().map(|(f, _)| *f).collect()
    }

    /// Whether the format is supported.
    pub fn supports(&self, format: Format) -> bool {
        self.encoders.iter().any(|(f, _)| *f == format)
    }

    /// Whether a value can be written as `media_type`.
    pub fn is_writeable(&self, media_type: &MediaType) -> bool {
        Format::from_media_type(media_type).is_some_and(|f| self.supports(f))
    }

    /// Output size, if known in advance. Never known: encoders stream into
    /// a buffer first.
    pub fn size(&self, _value: &T) -> Option<u64> {
        None
    }

    /// Encodes the value.
    pub fn encode(
        &self,
        value: &T,
        format: Format,
        ctx: &EncodeContext<'_>,
        backends: &Backends,
    ) -> Result<Vec<u8>> {
        let (_, encode) = self
            .encoders
            .iter()
            .find(|(f, _)| *f == format)
            .ok_or_else(|| {
                Error::unsupported_media_type(format!("{format} for {}", self.entity))
            })?;
        encode(value, ctx, backends)
    }

    /// Encodes the value into `out` and flushes it.
    pub fn write_to<W: Write>(
        &self,
        value: &T,
        format: Format,
        ctx: &EncodeContext<'_>,
        backends: &Backends,
        out: &mut W,
    ) -> Result<()> {
        let bytes = self.encode(value, format, ctx, backends)?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }
}

impl<T> fmt::Debug for EntityWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityWriter")
            .field("entity", &self.entity)
            .field("formats", &self.formats())
            .finish()
    }
}

// ============================================================================
// Encode functions
// ============================================================================

fn rdf_xml<T: Linked>(value: &T, ctx: &EncodeContext<'_>, b: &Backends) -> Result<Vec<u8>> {
    rdf::encode(value, &b.linkers, ctx, Format::RdfXml)
}

fn turtle<T: Linked>(value: &T, ctx: &EncodeContext<'_>, b: &Backends) -> Result<Vec<u8>> {
    rdf::encode(value, &b.linkers, ctx, Format::Turtle)
}

fn ntriples<T: Linked>(value: &T, ctx: &EncodeContext<'_>, b: &Backends) -> Result<Vec<u8>> {
    rdf::encode(value, &b.linkers, ctx, Format::NTriples)
}

fn json_bytes(value: Value) -> Result<Vec<u8>> {
    json::to_bytes(&value)
}

impl<T: Linked> EntityWriter<T> {
    /// Registers the three RDF syntaxes.
    pub fn with_rdf(self) -> Self {
        self.with(Format::RdfXml, rdf_xml::<T>)
            .with(Format::Turtle, turtle::<T>)
            .with(Format::NTriples, ntriples::<T>)
    }
}

// ============================================================================
// EntityWriters
// ============================================================================

/// Writers for every entity type plus the backends they use.
#[derive(Debug)]
pub struct EntityWriters {
    backends: Backends,
    user: EntityWriter<User>,
    users: EntityWriter<Users>,
    group: EntityWriter<Group>,
    groups: EntityWriter<Groups>,
    track: EntityWriter<Track>,
    track_details: EntityWriter<TrackDetails>,
    tracks: EntityWriter<Tracks>,
    measurement: EntityWriter<Measurement>,
    measurements: EntityWriter<Measurements>,
    phenomenon: EntityWriter<Phenomenon>,
    phenomena: EntityWriter<Phenomena>,
    fueling: EntityWriter<Fueling>,
    fuelings: EntityWriter<Fuelings>,
}

impl EntityWriters {
    /// Assembles the standard writers.
    ///
    /// Every entity is available as JSON and RDF; track details also as a
    /// zipped shapefile.
    pub fn new(linkers: LinkerRegistry, shapefile: ShapefileEncoder) -> Self {
        Self {
            backends: Backends { linkers, shapefile },
            user: EntityWriter::new("user")
                .with(Format::Json, |v, ctx, _| json_bytes(json::encode::user(v, ctx)))
                .with_rdf(),
            users: EntityWriter::new("users")
                .with(Format::Json, |v, ctx, _| json_bytes(json::encode::users(v, ctx)))
                .with_rdf(),
            group: EntityWriter::new("group")
                .with(Format::Json, |v, ctx, _| json_bytes(json::encode::group(v, ctx)))
                .with_rdf(),
            groups: EntityWriter::new("groups")
                .with(Format::Json, |v, ctx, _| json_bytes(json::encode::groups(v, ctx)))
                .with_rdf(),
            track: EntityWriter::new("track")
                .with(Format::Json, |v, ctx, _| json_bytes(json::encode::track(v, ctx)))
                .with_rdf(),
            track_details: EntityWriter::new("track")
                .with(Format::Json, |v, ctx, _| {
                    json_bytes(json::encode::track_details(v, ctx))
                })
                .with_rdf()
                .with(Format::Shapefile, |v, _, b| b.shapefile.encode(v)),
            tracks: EntityWriter::new("tracks")
                .with(Format::Json, |v, ctx, _| json_bytes(json::encode::tracks(v, ctx)))
                .with_rdf(),
            measurement: EntityWriter::new("measurement")
                .with(Format::Json, |v, ctx, _| {
                    json_bytes(json::encode::measurement(v, ctx))
                })
                .with_rdf(),
            measurements: EntityWriter::new("measurements")
                .with(Format::Json, |v, ctx, _| {
                    json_bytes(json::encode::measurements(v, ctx))
                })
                .with_rdf(),
            phenomenon: EntityWriter::new("phenomenon")
                .with(Format::Json, |v, ctx, _| {
                    json_bytes(json::encode::phenomenon(v, ctx))
                })
                .with_rdf(),
            phenomena: EntityWriter::new("phenomena")
                .with(Format::Json, |v, ctx, _| {
                    json_bytes(json::encode::phenomena(v, ctx))
                })
                .with_rdf(),
            fueling: EntityWriter::new("fueling")
                .with(Format::Json, |v, ctx, _| json_bytes(json::encode::fueling(v, ctx)))
                .with_rdf(),
            fuelings: EntityWriter::new("fuelings")
                .with(Format::Json, |v, ctx, _| {
                    json_bytes(json::encode::fuelings(v, ctx))
                })
                .with_rdf(),
        }
    }

    /// The shared backends.
    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    /// The writer for `T`.
    pub fn writer<T: Writable>(&self) -> &EntityWriter<T> {
        T::writer(self)
    }

    /// Formats `T` can be written in, in preference order.
    pub fn formats<T: Writable>(&self) -> Vec<Format> {
        self.writer::<T>().formats()
    }

    /// Encodes a value.
    pub fn encode<T: Writable>(
        &self,
        value: &T,
        format: Format,
        ctx: &EncodeContext<'_>,
    ) -> Result<Vec<u8>> {
        self.writer::<T>().encode(value, format, ctx, &self.backends)
    }

    /// Encodes a value into `out` and flushes it.
    pub fn write_to<T: Writable, W: Write>(
        &self,
        value: &T,
        format: Format,
        ctx: &EncodeContext<'_>,
        out: &mut W,
    ) -> Result<()> {
        self.writer::<T>()
            .write_to(value, format, ctx, &self.backends, out)
    }
}

/// Entity types with a registered writer.
pub trait Writable: Sized {
    /// Selects the writer for `Self`.
    fn writer(writers: &EntityWriters) -> &EntityWriter<Self>;
}

macro_rules! writable {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Writable for $ty {
                fn writer(writers: &EntityWriters) -> &EntityWriter<Self> {
                    &writers.$field
                }
            }
        )*
    };
}

writable! {
    User => user,
    Users => users,
    Group => group,
    Groups => groups,
    Track => track,
    TrackDetails => track_details,
    Tracks => tracks,
    Measurement => measurement,
    Measurements => measurements,
    Phenomenon => phenomenon,
    Phenomena => phenomena,
    Fueling => fueling,
    Fuelings => fuelings,
}
