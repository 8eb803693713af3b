//! Shared Module
//!
//! Request validation helpers and the error type they produce. These are
//! independent of the HTTP framework so they can be reused by any front end
//! that accepts account data.

/// Shared error types
pub mod error;

/// Input validation for account requests
pub mod validation;

pub use error::SharedError;
