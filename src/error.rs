//! Error types for leetsync

use thiserror::Error;

/// Errors produced by the sync engine
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials are incomplete; no network I/O was attempted
    #[error("not initialized: {0}")]
    NotInitialized(String),

    /// The remote rejected the access token
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The remote resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status from the GitHub API
    #[error("GitHub API error ({status}): {message}")]
    GitHubApi {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// Transport failure talking to the remote
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local persistence failure
    #[error("store error: {0}")]
    Store(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure outside the store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid caller input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// True for a 404-style negative result
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True when the remote rejected the credential
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
