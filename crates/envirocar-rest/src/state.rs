//! Application state shared across handlers.

use std::fmt;
use std::sync::Arc;

use envirocar_auth::{SecurityContext, TokenAuthenticator};
use envirocar_core::{DataService, FriendService, GroupService, InMemoryStore, UserService};
use envirocar_encoding::{EntityWriters, LinkBuilder, LinkerRegistry, ShapefileEncoder};
use envirocar_rights::AccessRights;

use crate::config::{PaginationConfig, ServerConfig};
use crate::error::Result;

// ============================================================================
// Services
// ============================================================================

/// The domain services the resources talk to.
#[derive(Clone)]
pub struct Services {
    /// User records.
    pub users: Arc<dyn UserService>,
    /// Friend lists.
    pub friends: Arc<dyn FriendService>,
    /// Groups and memberships.
    pub groups: Arc<dyn GroupService>,
    /// Tracks, measurements, phenomena and fuelings.
    pub data: Arc<dyn DataService>,
}

impl Services {
    /// All four services backed by one in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            friends: store.clone(),
            groups: store.clone(),
            data: store,
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

// ============================================================================
// AppState
// ============================================================================

/// Everything a handler needs, assembled once at startup.
///
/// Immutable after construction; cloning is cheap.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Domain services.
    pub services: Services,
    /// Credential checking, also used by the auth layer.
    pub authenticator: Arc<TokenAuthenticator>,
    /// Resource URIs.
    pub links: Arc<LinkBuilder>,
    /// Per-entity encoders.
    pub writers: Arc<EntityWriters>,
    /// Page sizes.
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Composition root: wires authenticator, linkers and writers around
    /// the given services.
    pub fn new(services: Services, config: &ServerConfig) -> Result<Self> {
        let links = config.link_builder()?;
        let authenticator = TokenAuthenticator::new(services.users.clone(), config.auth.clone());
        let linkers = LinkerRegistry::standard(services.friends.clone(), services.groups.clone());
        let writers = EntityWriters::new(
            linkers,
            ShapefileEncoder::new(config.shapefile.max_measurements),
        );
        tracing::debug!(base_url = %links.base(), "Application state assembled");
        Ok(Self {
            services,
            authenticator: Arc::new(authenticator),
            links: Arc::new(links),
            writers: Arc::new(writers),
            pagination: config.pagination,
        })
    }

    /// Access rights of the caller described by `ctx`.
    pub fn rights(&self, ctx: &SecurityContext) -> AccessRights {
        AccessRights::for_context(
            ctx,
            self.services.friends.clone(),
            self.services.groups.clone(),
        )
    }
}
