/**
 * Backend Error Types
 *
 * This module defines the failure taxonomy shared by stores and services, and
 * the handler-facing error that wraps it.
 *
 * # Error Codes
 *
 * - `NotFound` - the referenced user, session or token does not exist
 * - `Conflict` - the request contradicts stored state (duplicate email,
 *   wrong password)
 * - `Invalid` - a presented credential or identifier is malformed or unknown
 * - `Expired` - a presented credential was valid but its lifetime has passed
 * - `Internal` - everything unexpected from lower layers
 *
 * # Client Messages
 *
 * Only the coarse message reaches the client. Internal errors always report a
 * generic message; the wrapped cause is logged server-side.
 */

use std::fmt;

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Boxed cause carried by [`AccountError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for store and service operations
pub type AccountResult<T> = Result<T, AccountError>;

/// Message returned to clients for internal failures
pub const INTERNAL_MESSAGE: &str = "an internal error has occurred";

/// Coarse failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotFound,
    Conflict,
    Invalid,
    Expired,
    Internal,
}

impl ErrorCode {
    /// Stable upper-case label used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Invalid => "INVALID",
            Self::Expired => "EXPIRED",
            Self::Internal => "INTERNAL",
        }
    }

    /// HTTP status a handler answers with for this code
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Conflict | Self::NotFound => StatusCode::BAD_REQUEST,
            Self::Invalid | Self::Expired => StatusCode::UNAUTHORIZED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by stores and services
///
/// Carries the operation that failed (`"AuthService.log_in"`,
/// `"PgUserStore.insert"`, ...), a code, an optional message that is safe to
/// show to clients, and the underlying cause.
///
/// # Usage
///
/// ```rust
/// use kanban_users::backend::error::{AccountError, ErrorCode};
///
/// let err = AccountError::new("MemoryUserStore.find_by_email", ErrorCode::NotFound)
///     .with_message("user does not exist");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// assert_eq!(err.client_message(), "user does not exist");
/// ```
#[derive(Debug, Error)]
#[error("{op}: {code}: {}", .message.as_deref().unwrap_or("no message"))]
pub struct AccountError {
    /// Operation label
    pub op: &'static str,
    /// Failure category
    pub code: ErrorCode,
    /// Client-facing message
    pub message: Option<String>,
    /// Underlying cause
    #[source]
    pub source: Option<BoxError>,
}

impl AccountError {
    /// Create an error with no message or cause
    pub fn new(op: &'static str, code: ErrorCode) -> Self {
        Self {
            op,
            code,
            message: None,
            source: None,
        }
    }

    /// Wrap an unexpected lower-layer failure
    pub fn internal(op: &'static str, source: impl Into<BoxError>) -> Self {
        Self::new(op, ErrorCode::Internal).with_source(source)
    }

    pub fn not_found(op: &'static str, message: impl Into<String>) -> Self {
        Self::new(op, ErrorCode::NotFound).with_message(message)
    }

    pub fn conflict(op: &'static str, message: impl Into<String>) -> Self {
        Self::new(op, ErrorCode::Conflict).with_message(message)
    }

    pub fn invalid(op: &'static str, message: impl Into<String>) -> Self {
        Self::new(op, ErrorCode::Invalid).with_message(message)
    }

    pub fn expired(op: &'static str, message: impl Into<String>) -> Self {
        Self::new(op, ErrorCode::Expired).with_message(message)
    }

    /// Attach a client-facing message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Re-label an error raised by a lower layer, keeping its code and message
    pub fn within(self, op: &'static str) -> Self {
        let code = self.code;
        let message = self.message.clone();
        Self {
            op,
            code,
            message,
            source: Some(Box::new(self)),
        }
    }

    /// Message safe to return to clients
    pub fn client_message(&self) -> String {
        match (&self.code, &self.message) {
            (ErrorCode::Internal, _) => INTERNAL_MESSAGE.to_string(),
            (_, Some(message)) => message.clone(),
            (code, None) => code.as_str().to_lowercase().replace('_', " "),
        }
    }

    /// Full cause chain, for server-side logs only
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            report.push_str(": ");
            report.push_str(&err.to_string());
            cause = err.source();
        }
        report
    }
}

/// Handler-facing error
///
/// Every handler returns `Result<_, BackendError>`; the conversion module turns
/// it into a JSON response with the mapped status code.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Failure from the auth or user service
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Handler error (e.g., unparsable body, missing credentials)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Request payload failed validation
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Account(err) => err.code.status_code(),
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the message returned to the client
    pub fn message(&self) -> String {
        match self {
            Self::Account(err) => err.client_message(),
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => format!("invalid request. {}", err),
        }
    }
}
