//! Error types for extraction.

use kiln_resolver::ResolveError;
use thiserror::Error;

/// Result type alias for extraction.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors during classification and extraction. Only resolution failures
/// that must abort the page reach this type; everything else is absorbed.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl From<kiln_core::ClientError> for ExtractError {
    fn from(err: kiln_core::ClientError) -> Self {
        Self::Resolve(ResolveError::Client(err))
    }
}
