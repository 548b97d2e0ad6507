//! Error types for the Wardyn crates.

use crate::identity::ObjectIdentity;

/// Convenience `Result` type alias for Wardyn operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the Wardyn crates.
///
/// Marked `#[non_exhaustive]` to allow adding new error types without
/// breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A requested object identity was absent from a resolved ACL mapping.
    #[error("Unable to find ACL information for object identity '{object_identity}'")]
    NotFound {
        /// The first requested identity missing from the result.
        object_identity: ObjectIdentity,
    },

    /// Infrastructural failure in the backing store or a collaborator
    /// (connectivity, malformed query, store-side error).
    #[error("Data access error: {message}")]
    DataAccess {
        /// Human-readable error message.
        message: String,
        /// Source error if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required collaborator or operation argument was missing or
    /// malformed.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What argument is problematic.
        message: String,
    },

    /// JSON serialization/deserialization error while decoding rows or
    /// parameters.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns whether this error is retryable.
    ///
    /// Data-access failures may be transient; contract violations
    /// (missing identities, bad arguments) are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::DataAccess { .. } => true,
            Error::NotFound { .. } => false,
            Error::InvalidArgument { .. } => false,
            Error::Serialization(_) => false,
        }
    }

    /// Creates a not-found error for a missing object identity.
    pub fn not_found(object_identity: ObjectIdentity) -> Self {
        Error::NotFound { object_identity }
    }

    /// Creates a data-access error with a message.
    pub fn data_access<S: Into<String>>(message: S) -> Self {
        Error::DataAccess {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a data-access error with a message and source error.
    pub fn data_access_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::DataAccess {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}
