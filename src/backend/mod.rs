//! Backend Module
//!
//! All server-side code for the account service: the Axum HTTP server, the
//! auth service that issues and revokes credentials, and the stores behind it.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, startup composition
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Domain types, auth/user services, HTTP handlers
//! - **`store`** - Store traits with memory, PostgreSQL and Redis backends
//! - **`middleware`** - The `AuthUser` extractor for protected routes
//! - **`error`** - Failure taxonomy and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state, init
//! ├── routes/         - Route configuration
//! ├── auth/           - Auth service and handlers
//! ├── store/          - Persistence
//! ├── middleware/     - Request authentication
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. The router matches the route and runs the `TraceLayer`
//! 2. Protected handlers take an `AuthUser`, which resolves the presented
//!    token or session cookie through `AuthService::authenticate`
//! 3. Handlers validate the payload and call `AuthService` / `UserService`
//! 4. Failures come back as `BackendError` and are mapped to status codes

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Persistence for users, sessions and refresh tokens
pub mod store;

/// Request authentication
pub mod middleware;

pub use error::{AccountError, BackendError, ErrorCode};
pub use server::create_app;
