//! Error types for the enviroCar domain layer.

/// Errors raised by the domain services.
///
/// The REST layer maps every variant onto an HTTP status (see
/// [`ErrorKind`]); nothing here knows about HTTP itself.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No user with the given name exists.
    #[error("User not found: {name}")]
    UserNotFound {
        /// Requested user name
        name: String,
    },

    /// No group with the given name exists.
    #[error("Group not found: {name}")]
    GroupNotFound {
        /// Requested group name
        name: String,
    },

    /// No track with the given identifier exists.
    #[error("Track not found: {id}")]
    TrackNotFound {
        /// Requested track id
        id: String,
    },

    /// No fueling with the given identifier exists for the user.
    #[error("Fueling not found: {id}")]
    FuelingNotFound {
        /// Requested fueling id
        id: String,
    },

    /// No phenomenon with the given name exists.
    #[error("Phenomenon not found: {name}")]
    PhenomenonNotFound {
        /// Requested phenomenon name
        name: String,
    },

    /// No measurement with the given identifier exists.
    #[error("Measurement not found: {id}")]
    MeasurementNotFound {
        /// Requested measurement id
        id: String,
    },

    /// An entity failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// The entity already exists (duplicate name, duplicate membership).
    #[error("Conflict: {message}")]
    Conflict {
        /// What collided
        message: String,
    },

    /// Malformed request parameters (filters, pagination).
    #[error("Bad request: {message}")]
    BadRequest {
        /// What was malformed
        message: String,
    },

    /// The backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the failure
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (seed files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for domain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`], used by boundary mappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Some entity does not exist.
    NotFound,
    /// The entity violates a constraint.
    Validation,
    /// The request collides with existing state.
    Conflict,
    /// The request was malformed.
    BadRequest,
    /// Server-side failure.
    Internal,
}

impl Error {
    /// Returns the classification used when mapping to a response.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UserNotFound { .. }
            | Error::GroupNotFound { .. }
            | Error::TrackNotFound { .. }
            | Error::FuelingNotFound { .. }
            | Error::PhenomenonNotFound { .. }
            | Error::MeasurementNotFound { .. } => ErrorKind::NotFound,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Conflict { .. } => ErrorKind::Conflict,
            Error::BadRequest { .. } => ErrorKind::BadRequest,
            Error::Storage { .. }
            | Error::Config { .. }
            | Error::Io(_)
            | Error::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Returns whether this is one of the not-found variants.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Creates a user-not-found error.
    pub fn user_not_found<S: Into<String>>(name: S) -> Self {
        Error::UserNotFound { name: name.into() }
    }

    /// Creates a group-not-found error.
    pub fn group_not_found<S: Into<String>>(name: S) -> Self {
        Error::GroupNotFound { name: name.into() }
    }

    /// Creates a track-not-found error.
    pub fn track_not_found<S: Into<String>>(id: S) -> Self {
        Error::TrackNotFound { id: id.into() }
    }

    /// Creates a fueling-not-found error.
    pub fn fueling_not_found<S: Into<String>>(id: S) -> Self {
        Error::FuelingNotFound { id: id.into() }
    }

    /// Creates a phenomenon-not-found error.
    pub fn phenomenon_not_found<S: Into<String>>(name: S) -> Self {
        Error::PhenomenonNotFound { name: name.into() }
    }

    /// Creates a measurement-not-found error.
    pub fn measurement_not_found<S: Into<String>>(id: S) -> Self {
        Error::MeasurementNotFound { id: id.into() }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Error::Conflict {
            message: message.into(),
        }
    }

    /// Creates a bad-request error.
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Error::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a storage error.
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Error::Storage {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
