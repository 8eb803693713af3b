//! Authentication Module
//!
//! Accounts, credentials and the HTTP handlers in front of them.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── domain.rs       - Users, sessions, refresh tokens, claims
//! ├── password.rs     - bcrypt hashing
//! ├── tokens.rs       - JWT access tokens
//! ├── service.rs      - AuthService and TokenStrategy
//! ├── users.rs        - UserService (profiles)
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email and password → password hashed → user stored
//! 2. **Login**: credentials checked → session, or access + refresh tokens
//! 3. **Requests**: session ID or access token resolved to [`AccessClaims`](domain::AccessClaims)
//! 4. **Refresh**: refresh token → new access token (JWT strategy only)
//! 5. **Logout**: session or refresh token deleted
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt and never returned
//! - Unknown email and wrong password produce the same client message
//! - JWT access tokens cannot be revoked before they expire; keep their TTL short

pub mod domain;
pub mod password;
pub mod tokens;
pub mod service;
pub mod users;

/// HTTP handlers for account endpoints
pub mod handlers;

pub use domain::{AccessClaims, IssuedCredentials, NewUser, RefreshToken, Session, User, UserMetadata};
pub use password::PasswordHasher;
pub use service::{AuthService, TokenStrategy};
pub use tokens::JwtSigner;
pub use users::UserService;
