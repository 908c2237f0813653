//! Request identity and extraction helpers.

use crate::{ADMIN_ROLE, AUTH_SCHEME, USER_ROLE};

/// An authenticated user, created per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User name from the credential header.
    pub name: String,
    /// Admin flag copied from the stored user record.
    pub is_admin: bool,
    /// Whether the request arrived over a secure channel.
    pub is_secure: bool,
}

impl Principal {
    /// Flat two-role model: `admin` iff the admin flag is set, `user` always.
    pub fn is_user_in_role(&self, role: &str) -> bool {
        match role {
            ADMIN_ROLE => self.is_admin,
            USER_ROLE => true,
            _ => false,
        }
    }
}

/// Identity of the caller of one request.
///
/// Stored in HTTP request extensions by the auth middleware. A request
/// without credentials carries an anonymous context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    principal: Option<Principal>,
    secure: bool,
}

impl SecurityContext {
    /// Context for a request without credentials.
    pub fn anonymous(secure: bool) -> Self {
        Self {
            principal: None,
            secure,
        }
    }

    /// Context for an authenticated principal.
    pub fn authenticated(principal: Principal) -> Self {
        let secure = principal.is_secure;
        Self {
            principal: Some(principal),
            secure,
        }
    }

    /// The authenticated principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Name of the authenticated user, if any.
    pub fn user_name(&self) -> Option<&str> {
        self.principal.as_ref().map(|p| p.name.as_str())
    }

    /// Whether a principal is present.
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// Whether the principal holds `role`. Anonymous callers hold no role.
    pub fn is_user_in_role(&self, role: &str) -> bool {
        self.principal
            .as_ref()
            .is_some_and(|p| p.is_user_in_role(role))
    }

    /// Whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.is_user_in_role(ADMIN_ROLE)
    }

    /// Whether the request arrived over a secure channel.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Scheme used to authenticate, or `None` for anonymous callers.
    pub fn authentication_scheme(&self) -> Option<&'static str> {
        self.principal.as_ref().map(|_| AUTH_SCHEME)
    }

    /// Consumes the context, returning the principal.
    pub fn into_principal(self) -> Option<Principal> {
        self.principal
    }
}

/// Extract the [`SecurityContext`] from HTTP request `Parts`.
///
/// Returns an anonymous context if the auth middleware did not run.
pub fn context_from_parts(parts: &http::request::Parts) -> SecurityContext {
    parts
        .extensions
        .get::<SecurityContext>()
        .cloned()
        .unwrap_or_default()
}

/// Extract the authenticated [`Principal`] from HTTP request `Parts`, if present.
pub fn principal_from_parts(parts: &http::request::Parts) -> Option<&Principal> {
    parts
        .extensions
        .get::<SecurityContext>()
        .and_then(SecurityContext::principal)
}
