//! Middleware Module
//!
//! Request processing that runs ahead of the handlers.
//!
//! - **`auth`** - the [`AuthUser`] extractor for protected routes
//!
//! Request logging is a `tower-http` layer applied in
//! [`create_router`](crate::backend::routes::create_router).

pub mod auth;

pub use auth::{presented_credential, AuthUser, SESSION_COOKIE};
