use thiserror::Error;

/// Main error type for query compilation
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid date supplied for {field}_{bound}. Please use format YYYY-MM-DD or ISO8601.")]
    InvalidDate {
        field: String,
        bound: String,
        value: String,
    },

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid index mapping: {0}")]
    InvalidMapping(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for query compilation
pub type Result<T> = std::result::Result<T, QueryError>;

impl QueryError {
    /// Check if this error was caused by caller-supplied parameters
    ///
    /// Validation errors should be reported back to the caller as a bad request;
    /// everything else points at a configuration or deployment fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidDate { .. } | QueryError::InvalidParameter { .. }
        )
    }

    pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        QueryError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
