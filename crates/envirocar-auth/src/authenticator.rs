//! Username/token authenticator.

use std::sync::Arc;

use envirocar_core::UserService;
use http::HeaderMap;

use crate::{AuthConfig, AuthError, Principal, SecurityContext};

/// Validates the credential header pair against the stored user record.
///
/// Immutable after construction and shared by all requests.
#[derive(Clone)]
pub struct TokenAuthenticator {
    users: Arc<dyn UserService>,
    config: AuthConfig,
}

impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenAuthenticator {
    /// Create an authenticator looking users up in `users`.
    pub fn new(users: Arc<dyn UserService>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// The header configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticates a request from its headers.
    pub fn authenticate_headers(
        &self,
        headers: &HeaderMap,
        secure: bool,
    ) -> Result<SecurityContext, AuthError> {
        let username = header_value(headers, &self.config.username_header)?;
        let token = header_value(headers, &self.config.token_header)?;
        self.authenticate(username, token, secure)
    }

    /// Authenticates a username/token pair.
    ///
    /// - neither present: anonymous context
    /// - token without (non-empty) username, or username without
    ///   (non-empty) token: malformed, no lookup happens
    /// - lookup failure of any kind: unknown user
    /// - stored token differs: token mismatch
    pub fn authenticate(
        &self,
        username: Option<&str>,
        token: Option<&str>,
        secure: bool,
    ) -> Result<SecurityContext, AuthError> {
        let username = match (username, token) {
            (None, None) => return Ok(SecurityContext::anonymous(secure)),
            (None, Some(_)) => return Err(AuthError::MissingUsername),
            (Some(u), _) if u.is_empty() => return Err(AuthError::MissingUsername),
            (Some(u), _) => u,
        };
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::MissingToken),
        };

        let user = self.users.get_user(username).map_err(|e| {
            log::debug!("User lookup for '{username}' failed: {e}");
            AuthError::UnknownUser {
                name: username.to_string(),
            }
        })?;

        if user.token.as_deref() != Some(token) {
            return Err(AuthError::TokenMismatch {
                name: username.to_string(),
            });
        }

        Ok(SecurityContext::authenticated(Principal {
            name: username.to_string(),
            is_admin: user.is_admin,
            is_secure: secure,
        }))
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, AuthError> {
    headers
        .get(name)
        .map(|v| {
            v.to_str()
                .map_err(|_| AuthError::MalformedHeader(name.to_string()))
        })
        .transpose()
}
