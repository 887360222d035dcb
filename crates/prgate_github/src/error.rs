//! Error types for GitHub access.

use thiserror::Error;

/// Result type alias for GitHub operations.
pub type GitHubResult<T> = Result<T, GitHubError>;

/// Errors that can occur while talking to GitHub.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("GitHub request failed: {0}")]
    RequestFailed(String),

    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
