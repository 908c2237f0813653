//! Auth-specific error types.

use http::StatusCode;

/// Errors that can occur during authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A token was presented without a user name, or the user name is empty.
    #[error("missing user name")]
    MissingUsername,

    /// A user name was presented without a (non-empty) token.
    #[error("missing authentication token")]
    MissingToken,

    /// A credential header is not valid UTF-8.
    #[error("malformed credential header '{0}'")]
    MalformedHeader(String),

    /// The user could not be looked up.
    #[error("unknown user '{name}'")]
    UnknownUser {
        /// Presented user name
        name: String,
    },

    /// The token does not match the stored one.
    #[error("invalid token for user '{name}'")]
    TokenMismatch {
        /// Presented user name
        name: String,
    },
}

impl AuthError {
    /// Whether the credentials were malformed (as opposed to rejected).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            AuthError::MissingUsername | AuthError::MissingToken | AuthError::MalformedHeader(_)
        )
    }

    /// HTTP status for this error: `400` for malformed credentials, `403`
    /// for rejected ones.
    pub fn status(&self) -> StatusCode {
        if self.is_malformed() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::FORBIDDEN
        }
    }
}
