//! Error types shared across the Kiln crates.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a [`DocumentClient`](crate::client::DocumentClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Rate limited by the design API")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Network failure: {0}")]
    Network(String),

    #[error("Design API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Map an HTTP status to the matching error class.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound {
                resource: message.into(),
            },
            429 => Self::RateLimited {
                retry_after_secs: None,
            },
            _ => Self::Api {
                status,
                message: message.into(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Whether a client may retry the request that produced this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::NotFound { .. } => false,
        }
    }
}

/// Errors while persisting generated artifacts.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    SaveFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
