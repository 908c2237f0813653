//! Error types for envirocar-rest.
//!
//! [`Error`] covers startup (configuration, seed loading, binding);
//! [`ApiError`] is returned from handlers and becomes the HTTP response.

use axum::Json;
use axum::response::{IntoResponse, Response};
use envirocar_auth::AuthError;
use envirocar_core::ErrorKind;
use http::StatusCode;
use serde::Serialize;

/// Result type alias for envirocar-rest startup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

// ============================================================================
// Startup errors
// ============================================================================

/// Errors that can occur while configuring or starting the server
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Error from envirocar-core
    #[error("Core error: {0}")]
    Core(#[from] envirocar_core::Error),

    /// Error from envirocar-encoding
    #[error("Encoding error: {0}")]
    Encoding(#[from] envirocar_encoding::Error),

    /// I/O error (config files, sockets)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

// ============================================================================
// ApiError
// ============================================================================

/// Handler error with an HTTP status.
///
/// Only validation failures carry a response body; every other error is
/// answered with its status code alone.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// An entity violates a constraint (400, with body).
    #[error("Validation error: {message}")]
    Validation {
        /// Offending field, if known.
        field: Option<String>,
        /// Violated constraint.
        message: String,
    },

    /// Malformed request (400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// What was malformed.
        message: String,
    },

    /// The caller lacks the permission (403).
    #[error("Forbidden: {message}")]
    Forbidden {
        /// What was refused.
        message: String,
    },

    /// No such resource (404).
    #[error("Not found: {message}")]
    NotFound {
        /// What was missing.
        message: String,
    },

    /// Collision with existing state (409).
    #[error("Conflict: {message}")]
    Conflict {
        /// What collided.
        message: String,
    },

    /// No acceptable representation (406).
    #[error("Not acceptable: {message}")]
    NotAcceptable {
        /// Why nothing could be offered.
        message: String,
    },

    /// Request body in an unsupported media type (415).
    #[error("Unsupported media type: {media_type}")]
    UnsupportedMediaType {
        /// The presented media type.
        media_type: String,
    },

    /// A registered encoder or decoder does not support the operation.
    /// This is a wiring mistake, answered with 500.
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// What was attempted.
        operation: String,
    },

    /// Server-side failure (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Description for the log only.
        message: String,
    },
}

impl ApiError {
    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a not-acceptable error.
    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self::NotAcceptable {
            message: message.into(),
        }
    }

    /// Creates an unsupported-media-type error.
    pub fn unsupported_media_type(media_type: impl Into<String>) -> Self {
        Self::UnsupportedMediaType {
            media_type: media_type.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            ApiError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::UnsupportedOperation { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns `true` for 5xx errors.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<envirocar_core::Error> for ApiError {
    fn from(err: envirocar_core::Error) -> Self {
        if let envirocar_core::Error::Validation { field, message } = err {
            return ApiError::Validation { field, message };
        }
        let message = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound { message },
            ErrorKind::Conflict => ApiError::Conflict { message },
            ErrorKind::BadRequest | ErrorKind::Validation => ApiError::BadRequest { message },
            ErrorKind::Internal => ApiError::Internal { message },
        }
    }
}

impl From<envirocar_encoding::Error> for ApiError {
    fn from(err: envirocar_encoding::Error) -> Self {
        use envirocar_encoding::Error as E;
        match err {
            E::Domain(e) => e.into(),
            E::TrackTooLong { .. } => ApiError::not_acceptable(err.to_string()),
            E::UnsupportedOperation { operation } => ApiError::UnsupportedOperation { operation },
            E::UnsupportedMediaType { media_type } => ApiError::UnsupportedMediaType { media_type },
            e if e.is_client_error() => ApiError::bad_request(e.to_string()),
            e => ApiError::internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_malformed() {
            ApiError::bad_request(err.to_string())
        } else {
            ApiError::forbidden(err.to_string())
        }
    }
}

// ============================================================================
// IntoResponse
// ============================================================================

#[derive(Debug, Serialize)]
struct ValidationBody<'a> {
    error: ValidationDetails<'a>,
}

#[derive(Debug, Serialize)]
struct ValidationDetails<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::UnsupportedOperation { operation } => {
                tracing::error!(
                    operation = %operation,
                    "Configuration error: no handler supports the operation"
                );
            }
            e if e.is_server_error() => {
                tracing::error!(error = %e, status = %status, "Server error occurred");
            }
            e => {
                tracing::debug!(error = %e, status = %status, "Client error occurred");
            }
        }

        match &self {
            ApiError::Validation { field, message } => {
                let body = ValidationBody {
                    error: ValidationDetails {
                        field: field.as_deref(),
                        message,
                    },
                };
                (status, Json(body)).into_response()
            }
            _ => status.into_response(),
        }
    }
}
