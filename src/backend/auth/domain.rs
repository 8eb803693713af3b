/**
 * Account Domain Types
 *
 * Plain data shared by the stores, the services and the handlers. None of
 * these types carry behavior beyond small helpers; the auth service owns every
 * decision to mint or invalidate them.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::{AccountError, AccountResult};

/// A stored account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,
    /// Display name chosen at sign-up
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Profile image URL
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Sign-up candidate as received from the client
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Plaintext; hashed by the auth service and never stored
    pub password: String,
}

/// What the auth service asks a store to insert
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Profile fields of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for UserMetadata {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            display_name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Server-held session for the cookie-based strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Server-held refresh token for the JWT strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Identity resolved from a presented access token or session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    /// Set when the identity came from a server-held session
    pub session_id: Option<String>,
}

/// Credentials minted by a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuedCredentials {
    /// Session strategy: one server-held session
    Session(Session),
    /// JWT strategy: a signed access token and a server-held refresh token
    Tokens {
        access_token: String,
        refresh_token: String,
        user_id: Uuid,
    },
}

impl IssuedCredentials {
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::Session(session) => session.user_id,
            Self::Tokens { user_id, .. } => *user_id,
        }
    }
}

/// Record kept by a token store: an opaque key bound to a user until an instant
///
/// Lets one store implementation serve both sessions and refresh tokens.
pub trait TokenRecord: Clone + Send + Sync + 'static {
    /// Key prefix used by external stores
    const KIND: &'static str;

    fn issue(key: String, user_id: Uuid, expires_at: DateTime<Utc>) -> Self;
    fn key(&self) -> &str;
    fn user_id(&self) -> Uuid;
    fn expires_at(&self) -> DateTime<Utc>;

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() < now
    }
}

impl TokenRecord for Session {
    const KIND: &'static str = "session";

    fn issue(key: String, user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: key,
            user_id,
            expires_at,
        }
    }

    fn key(&self) -> &str {
        &self.id
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }

    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl TokenRecord for RefreshToken {
    const KIND: &'static str = "refresh_token";

    fn issue(key: String, user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: key,
            user_id,
            expires_at,
        }
    }

    fn key(&self) -> &str {
        &self.token
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }

    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Parse an external user ID
///
/// # Errors
///
/// `INVALID` if `raw` is not a UUID.
pub fn parse_user_id(op: &'static str, raw: &str) -> AccountResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|e| {
        AccountError::invalid(op, format!("unable to parse user id ({})", raw)).with_source(e)
    })
}
