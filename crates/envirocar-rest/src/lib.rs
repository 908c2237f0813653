//! # envirocar-rest
//!
//! HTTP resources for enviroCar.
//!
//! - [`server::router`]: every resource behind the token auth layer and
//!   request tracing
//! - [`state::AppState`]: the composition root handed to handlers
//! - [`error::ApiError`]: domain, encoding and auth errors mapped to
//!   status codes
//! - [`config::ServerConfig`]: TOML file plus `ENVIROCAR_*` overrides

pub mod config;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, Error, Result};
pub use server::{router, Server};
pub use state::{AppState, Services};
