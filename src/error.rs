//! Error types for commit email discovery.

use thiserror::Error;

/// The main error type for listing, fetching and aggregating.
#[derive(Error, Debug)]
pub enum CommitEmailsError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Failed to decode response from {url} (status {status}): {source}")]
    Decode {
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Fetching commits for {repo} failed: {source}")]
    Repository {
        repo: String,
        #[source]
        source: Box<CommitEmailsError>,
    },

    #[error("Background task for {unit} did not complete: {message}")]
    Task { unit: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CommitEmailsError {
    /// Whether this error (or the one it wraps) came from a timed-out request.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http(e) => e.is_timeout(),
            Self::Repository { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// The repository reference a failure is attributed to, if any.
    pub fn repository(&self) -> Option<&str> {
        match self {
            Self::Repository { repo, .. } => Some(repo),
            _ => None,
        }
    }
}

/// A specialized Result type for commit email operations.
pub type Result<T> = std::result::Result<T, CommitEmailsError>;
