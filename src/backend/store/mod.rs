//! Store Module
//!
//! Passive persistence behind async traits. Stores enforce existence and
//! uniqueness and nothing else; every business rule lives in the services.
//!
//! # Backends
//!
//! - **`memory`** - `Vec`-backed stores for tests and local runs
//! - **`postgres`** - durable users via sqlx
//! - **`redis`** - sessions and refresh tokens with a TTL
//!
//! One backend per concern is chosen at startup and injected into the
//! services as `Arc<dyn …>`; nothing here is a global.

use async_trait::async_trait;
use uuid::Uuid;

use crate::backend::auth::domain::{RefreshToken, Session, User, UserMetadata, UserRecord};
use crate::backend::error::AccountResult;

pub mod memory;
pub mod postgres;
pub mod redis;

pub use memory::{MemoryRefreshTokenStore, MemorySessionStore, MemoryTokenStore, MemoryUserStore};
pub use postgres::PgUserStore;
pub use self::redis::{RedisRefreshTokenStore, RedisSessionStore, RedisTokenStore};

/// Durable account records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account
    ///
    /// Fails with `CONFLICT` if the email is taken; the check and the insert
    /// are one atomic step.
    async fn insert(&self, record: UserRecord) -> AccountResult<User>;

    /// `NOT_FOUND` if no account has this email
    async fn find_by_email(&self, email: &str) -> AccountResult<User>;

    /// `NOT_FOUND` if no account has this ID
    async fn find_by_id(&self, id: Uuid) -> AccountResult<User>;
}

/// Profile fields keyed by user ID
#[async_trait]
pub trait UserMetadataStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> AccountResult<UserMetadata>;

    /// Overwrite the profile fields of an existing account
    async fn update(&self, metadata: UserMetadata) -> AccountResult<UserMetadata>;
}

/// Server-held sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, user_id: Uuid) -> AccountResult<Session>;

    /// `NOT_FOUND` if the session does not exist
    async fn get(&self, session_id: &str) -> AccountResult<Session>;

    /// `NOT_FOUND` if the session does not exist
    async fn delete(&self, session_id: &str) -> AccountResult<()>;
}

/// Server-held refresh tokens
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn create(&self, user_id: Uuid) -> AccountResult<RefreshToken>;

    /// `NOT_FOUND` if the token does not exist
    async fn get(&self, token: &str) -> AccountResult<RefreshToken>;

    /// `NOT_FOUND` if the token does not exist
    async fn delete(&self, token: &str) -> AccountResult<()>;
}

/// Fresh opaque key for a session or refresh token
pub(crate) fn new_token_key() -> String {
    Uuid::new_v4().to_string()
}
