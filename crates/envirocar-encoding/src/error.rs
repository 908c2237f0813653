//! Error types for the encoding layer.

/// Errors raised while encoding or decoding entities.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A track has more measurements than a Shapefile export allows.
    #[error("Track too long: {measurements} measurements exceed the limit of {max}")]
    TrackTooLong {
        /// Number of measurements in the track
        measurements: usize,
        /// Configured bound
        max: usize,
    },

    /// The operation is not supported for this entity and format.
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// What was attempted
        operation: String,
    },

    /// No encoder is registered for the media type.
    #[error("Unsupported media type: {media_type}")]
    UnsupportedMediaType {
        /// The offending media type
        media_type: String,
    },

    /// A media type string could not be parsed.
    #[error("Invalid media type '{value}': {message}")]
    InvalidMediaType {
        /// The unparsable value
        value: String,
        /// What was wrong
        message: String,
    },

    /// A request body is well-formed JSON but does not describe the entity.
    #[error("Invalid document: {message}")]
    InvalidDocument {
        /// What was wrong
        message: String,
    },

    /// An N-Triples document could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Domain-level failure (validation, lookups) surfaced while encoding.
    #[error(transparent)]
    Domain(#[from] envirocar_core::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Zip packaging error
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error while writing to the output sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type alias for encoding operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an unsupported-operation error.
    pub fn unsupported<S: Into<String>>(operation: S) -> Self {
        Error::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Creates an unsupported-media-type error.
    pub fn unsupported_media_type<S: Into<String>>(media_type: S) -> Self {
        Error::UnsupportedMediaType {
            media_type: media_type.into(),
        }
    }

    /// Creates an invalid-media-type error.
    pub fn invalid_media_type<V, M>(value: V, message: M) -> Self
    where
        V: Into<String>,
        M: Into<String>,
    {
        Error::InvalidMediaType {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid-document error.
    pub fn invalid_document<S: Into<String>>(message: S) -> Self {
        Error::InvalidDocument {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Whether the error was caused by the client's input rather than by the
    /// server.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::TrackTooLong { .. }
            | Error::UnsupportedMediaType { .. }
            | Error::InvalidMediaType { .. }
            | Error::InvalidDocument { .. }
            | Error::Parse { .. }
            | Error::Json(_) => true,
            Error::Domain(e) => e.kind() != envirocar_core::ErrorKind::Internal,
            Error::UnsupportedOperation { .. } | Error::Zip(_) | Error::Io(_) => false,
        }
    }
}
