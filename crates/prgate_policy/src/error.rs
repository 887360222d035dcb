//! Error types for policy module.

use thiserror::Error;

/// Result type alias for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors raised while building a policy registry.
///
/// Evaluation itself never fails: external lookup errors are reported as a
/// negative outcome in the status tree.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Manual check descriptions must be unique (duplicate: {0})")]
    DuplicateManualCheck(String),

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid policy configuration: {0}")]
    InvalidConfiguration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PolicyError {
    pub(crate) fn invalid_pattern(pattern: &str, err: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}
