//! Kanban Users - Account Service Library
//!
//! This crate implements the user-account subsystem of the kanban board
//! backend: sign-up, login, logout, and access/refresh token issuance.
//!
//! # Overview
//!
//! - Durable user records live in PostgreSQL (or an in-memory store for tests)
//! - Proof of identity is either a server-held session or a signed JWT access
//!   token paired with a server-held refresh token
//! - Server-held artifacts live in Redis (or in memory)
//!
//! # Module Structure
//!
//! - **`shared`** - Validation helpers and their error type
//! - **`backend`** - Axum HTTP server, auth service, stores
//!
//! # Usage
//!
//! ```rust,no_run
//! use kanban_users::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared validation helpers and errors
pub mod shared;

/// Backend server-side code
pub mod backend;
