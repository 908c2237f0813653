//! Token authentication for enviroCar.
//!
//! Provides:
//! - [`Principal`] / [`SecurityContext`]: Identity attached to every request
//! - [`TokenAuthenticator`]: Validates the username/token header pair
//!   against the stored user record
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware running the authenticator
//! - [`AuthConfig`]: Header names used for credentials
//! - [`AuthError`]: Auth-specific error types

mod authenticator;
mod error;
mod middleware;
mod principal;

pub use authenticator::TokenAuthenticator;
pub use error::AuthError;
pub use middleware::{AuthLayer, AuthService};
pub use principal::{context_from_parts, principal_from_parts, Principal, SecurityContext};

use serde::{Deserialize, Serialize};

/// Role held by every authenticated principal.
pub const USER_ROLE: &str = "user";

/// Role held by principals whose stored user record carries the admin flag.
pub const ADMIN_ROLE: &str = "admin";

/// Name reported as the authentication scheme of an authenticated context.
pub const AUTH_SCHEME: &str = "envirocar-token";

/// Default name of the header carrying the user name.
pub const DEFAULT_USERNAME_HEADER: &str = "X-User";

/// Default name of the header carrying the token.
pub const DEFAULT_TOKEN_HEADER: &str = "X-Token";

/// Configuration for the auth middleware.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Header carrying the user name.
    pub username_header: String,
    /// Header carrying the token.
    pub token_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username_header: DEFAULT_USERNAME_HEADER.to_string(),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
        }
    }
}
