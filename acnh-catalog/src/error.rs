//! Error types for acnh-catalog

use thiserror::Error;

/// Catalog client errors
///
/// Every failure is returned to the caller as-is; nothing is retried.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Caller-supplied argument failed a precondition (hour range, weather
    /// name, missing download directory). Raised before any request is made.
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// Request could not be sent or completed, or its body was unusable
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request completed but the service answered with a non-200 status
    #[error("received non-200 status code ({status})")]
    Remote { status: u16 },

    /// Catalog was fetched but no record satisfies the filter
    #[error("failed to find a match: {0}")]
    NotFound(String),

    /// Client could not be constructed from its configuration
    #[error(transparent)]
    Config(#[from] acnh_common::Error),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Transport(format!("failed to decode response body: {}", e))
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Transport(format!("failed to write asset: {}", e))
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
