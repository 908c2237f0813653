//! Linkers and their registry.
//!
//! A [`Linker`] contributes the RDF fragment describing one entity to a
//! shared [`Graph`]. Linkers only emit references (IRIs) to related
//! entities and never encode them in turn, so the output size of an entity
//! does not depend on how densely connected it is.
//!
//! The [`LinkerRegistry`] maps every entity type to an ordered
//! [`LinkerSet`]. It is assembled once at startup and shared read-only
//! across requests.

use std::fmt;
use std::sync::Arc;

use envirocar_core::{
    Collection, Fueling, FriendService, Group, GroupService, Measurement, Phenomenon, Track,
    TrackDetails, User,
};

use super::linkers;
use super::model::Graph;
use crate::context::EncodeContext;

/// Contributes the fragment for one value of type `T`.
pub trait Linker<T>: Send + Sync {
    /// Adds triples describing `value` to `graph`.
    fn link(&self, graph: &mut Graph, value: &T, ctx: &EncodeContext<'_>);
}

impl<T, F> Linker<T> for F
where
    F: Fn(&mut Graph, &T, &EncodeContext<'_>) + Send + Sync,
{
    fn link(&self, graph: &mut Graph, value: &T, ctx: &EncodeContext<'_>) {
        self(graph, value, ctx)
    }
}

// ============================================================================
// LinkerSet
// ============================================================================

/// Ordered linkers for one entity type.
pub struct LinkerSet<T> {
    linkers: Vec<Box<dyn Linker<T>>>,
}

impl<T> LinkerSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            linkers: Vec::new(),
        }
    }

    /// Appends a linker.
    #[allow(clippy::should_implement_trait)]
    pub fn add<L: Linker<T> + 'static>(mut self, linker: L) -> Self {
        self.linkers.push(Box::new(linker));
        self
    }

    /// Appends a closure linker.
    pub fn add_fn<F>(self, linker: F) -> Self
    where
        F: Fn(&mut Graph, &T, &EncodeContext<'_>) + Send + Sync + 'static,
        T: 'static,
    {
        self.add(linker)
    }

    /// Number of linkers.
    pub fn len(&self) -> usize {
        self.linkers.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.linkers.is_empty()
    }

    /// Runs every linker against `value`.
    pub fn link(&self, graph: &mut Graph, value: &T, ctx: &EncodeContext<'_>) {
        for linker in &self.linkers {
            linker.link(graph, value, ctx);
        }
    }
}

impl<T> Default for LinkerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LinkerSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkerSet")
            .field("linkers", &self.linkers.len())
            .finish()
    }
}

// ============================================================================
// LinkerRegistry
// ============================================================================

/// Linker sets for every entity type.
#[derive(Debug, Default)]
pub struct LinkerRegistry {
    /// Linkers for users.
    pub users: LinkerSet<User>,
    /// Linkers for groups.
    pub groups: LinkerSet<Group>,
    /// Linkers for tracks.
    pub tracks: LinkerSet<Track>,
    /// Linkers for measurements.
    pub measurements: LinkerSet<Measurement>,
    /// Linkers for fuelings.
    pub fuelings: LinkerSet<Fueling>,
    /// Linkers for phenomena.
    pub phenomena: LinkerSet<Phenomenon>,
}

impl LinkerRegistry {
    /// A registry without any linkers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard linkers: FOAF and DCMI terms for users and groups,
    /// DCMI terms for tracks, fuelings and phenomena, W3C geo plus value
    /// nodes for measurements.
    pub fn standard(friends: Arc<dyn FriendService>, groups: Arc<dyn GroupService>) -> Self {
        Self {
            users: LinkerSet::new()
                .add(linkers::UserFoafLinker::new(friends, groups.clone()))
                .add(linkers::user_dcterms),
            groups: LinkerSet::new()
                .add(linkers::GroupFoafLinker::new(groups))
                .add(linkers::group_dcterms),
            tracks: LinkerSet::new().add(linkers::track_dcterms),
            measurements: LinkerSet::new()
                .add(linkers::measurement_dcterms)
                .add(linkers::measurement_geo)
                .add(linkers::measurement_values),
            fuelings: LinkerSet::new()
                .add(linkers::fueling_dcterms)
                .add(linkers::fueling_quantities),
            phenomena: LinkerSet::new().add(linkers::phenomenon_dcterms),
        }
    }
}

// ============================================================================
// Linked
// ============================================================================

/// Values that can be turned into RDF through the registry.
pub trait Linked {
    /// Adds the fragments for `self` to `graph`.
    fn link_into(&self, graph: &mut Graph, registry: &LinkerRegistry, ctx: &EncodeContext<'_>);
}

macro_rules! linked {
    ($ty:ty, $field:ident) => {
        impl Linked for $ty {
            fn link_into(
                &self,
                graph: &mut Graph,
                registry: &LinkerRegistry,
                ctx: &EncodeContext<'_>,
            ) {
                registry.$field.link(graph, self, ctx);
            }
        }
    };
}

linked!(User, users);
linked!(Group, groups);
linked!(Track, tracks);
linked!(Measurement, measurements);
linked!(Fueling, fuelings);
linked!(Phenomenon, phenomena);

impl Linked for TrackDetails {
    /// The track fragment followed by one fragment per measurement, each
    /// tied to the track with `dcterms:hasPart`.
    fn link_into(&self, graph: &mut Graph, registry: &LinkerRegistry, ctx: &EncodeContext<'_>) {
        self.track.link_into(graph, registry, ctx);
        let track = ctx.links.track(&self.track.id);
        for m in &self.measurements {
            m.link_into(graph, registry, ctx);
            graph.add(
                &track,
                super::vocab::dcterms::HAS_PART,
                ctx.links.measurement(&m.id),
            );
        }
    }
}

impl<T: Linked> Linked for Collection<T> {
    /// Every element in collection order, all into the same graph.
    fn link_into(&self, graph: &mut Graph, registry: &LinkerRegistry, ctx: &EncodeContext<'_>) {
        for item in self {
            item.link_into(graph, registry, ctx);
        }
    }
}
