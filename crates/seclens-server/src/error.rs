// crates/seclens-server/src/error.rs
// Standardized error types for seclens

use thiserror::Error;

/// Main error type for the seclens library
#[derive(Error, Debug)]
pub enum SeclensError {
    /// Request shape rejected before any remote call
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Remote completion service answered with a non-success status
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Remote reply could not be interpreted as the expected JSON
    #[error("parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Result using SeclensError
pub type Result<T> = std::result::Result<T, SeclensError>;

impl SeclensError {
    /// True for every failure that originated at (or on the way to) the
    /// remote model. Parse failures count: they describe the remote reply.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SeclensError::Upstream { .. } | SeclensError::Parse(_) | SeclensError::Http(_)
        )
    }

    /// Short machine-friendly tag for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            SeclensError::InvalidInput(_) => "validation",
            SeclensError::Upstream { .. } | SeclensError::Http(_) => "upstream",
            SeclensError::Parse(_) => "parse",
            SeclensError::Json(_) => "json",
        }
    }
}
