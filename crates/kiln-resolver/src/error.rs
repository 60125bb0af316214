//! Error types for resolution.

use kiln_core::ClientError;
use thiserror::Error;

/// Result type alias for resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors during variable, style, or component resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Invalid library map: {0}")]
    LibraryMap(#[from] serde_json::Error),
}

impl ResolveError {
    /// The client error behind this failure, if any.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client(err) => Some(err),
            Self::LibraryMap(_) => None,
        }
    }
}
