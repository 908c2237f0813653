//! Router assembly and the HTTP server.

use std::future::Future;

use axum::Router;
use axum::routing::{get, put};
use envirocar_auth::AuthLayer;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::routes::{self, groups, measurements, phenomena, tracks, users};
use crate::state::AppState;

/// Builds the router with every resource, the auth layer and request
/// tracing.
pub fn router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(AuthLayer::new(state.authenticator.clone()));

    Router::new()
        .route("/", get(routes::root))
        // Users
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{user}",
            get(users::get).put(users::modify).delete(users::delete),
        )
        .route("/users/{user}/avatar", get(users::avatar))
        .route("/users/{user}/friends", get(users::friends))
        .route(
            "/users/{user}/friends/{friend}",
            put(users::add_friend).delete(users::remove_friend),
        )
        .route("/users/{user}/groups", get(users::groups))
        .route("/users/{user}/tracks", get(users::tracks))
        .route(
            "/users/{user}/fuelings",
            get(users::fuelings).post(users::create_fueling),
        )
        .route(
            "/users/{user}/fuelings/{id}",
            get(users::fueling).delete(users::delete_fueling),
        )
        // Groups
        .route("/groups", get(groups::list).post(groups::create))
        .route("/groups/{group}", get(groups::get).delete(groups::delete))
        .route("/groups/{group}/members", get(groups::members))
        .route(
            "/groups/{group}/members/{user}",
            put(groups::join).delete(groups::leave),
        )
        // Tracks
        .route("/tracks", get(tracks::list).post(tracks::create))
        .route("/tracks/{id}", get(tracks::get).delete(tracks::delete))
        .route("/tracks/{id}/measurements", get(tracks::measurements))
        // Phenomena
        .route("/phenomena", get(phenomena::list).post(phenomena::create))
        .route("/phenomena/{name}", get(phenomena::get))
        // Measurements
        .route("/measurements", get(measurements::list))
        .route("/measurements/{id}", get(measurements::get))
        .layer(middleware)
        .with_state(state)
}

// ============================================================================
// Server
// ============================================================================

/// The enviroCar HTTP server.
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Creates a server for an assembled state.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// The router served by this server.
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Serves until `shutdown` resolves.
    pub async fn run_with_shutdown(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let addr = self.config.socket_addr().await?;
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            %addr,
            base_url = %self.state.links.base(),
            "enviroCar API listening"
        );
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("enviroCar API shut down");
        Ok(())
    }

    /// Serves until the process receives Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await
    }
}
