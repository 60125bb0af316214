//! Error types for page processing.

use std::path::PathBuf;

use kiln_codegen::CodegenError;
use kiln_core::{ClientError, PersistError};
use kiln_extract::ExtractError;
use kiln_resolver::ResolveError;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort processing of a file. Nothing is persisted once one
/// of these is raised.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pipeline options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Page node not found: {0}")]
    PageNotFound(String),
}

impl PipelineError {
    /// The document-client failure behind this error, however deeply wrapped.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client(err) => Some(err),
            Self::Resolve(err) | Self::Extract(ExtractError::Resolve(err)) => err.client_error(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_through_layers() {
        let err = PipelineError::from(ExtractError::from(ClientError::RateLimited {
            retry_after_secs: Some(30),
        }));
        assert!(matches!(
            err.client_error(),
            Some(ClientError::RateLimited {
                retry_after_secs: Some(30)
            })
        ));
        assert!(PipelineError::PageNotFound("1:2".into()).client_error().is_none());
    }

    #[test]
    fn test_transparent_display() {
        let err = PipelineError::from(ClientError::Network("connection reset".into()));
        assert_eq!(err.to_string(), "Network failure: connection reset");
    }
}
