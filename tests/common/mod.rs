//! Common test utilities and helpers
//!
//! - In-memory app fixtures and request helpers
//! - Database and Redis fixtures for the ignored backend tests
//! - Custom assertion macros

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;
pub use database::*;
