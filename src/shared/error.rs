//! Shared Error Types
//!
//! Errors raised while validating account input, before any store is touched.
//!
//! # Usage
//!
//! ```rust
//! use kanban_users::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "must be a valid email address");
//! assert!(error.to_string().contains("email"));
//! ```
use thiserror::Error;

/// Input errors detected before a request reaches the auth service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A field is present but its value is not acceptable
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A required field is missing or blank
    #[error("Missing required field '{field}'")]
    MissingField {
        /// The field that was missing
        field: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new missing-field error
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } | Self::MissingField { field } => field,
        }
    }
}
