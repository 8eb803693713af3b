/**
 * In-Memory Stores
 *
 * `Vec`-backed stores with linear-scan lookups. Nothing persists across
 * restarts. Each store owns its own lock, so a store built for one test never
 * sees another test's records.
 */

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::domain::{
    RefreshToken, Session, TokenRecord, User, UserMetadata, UserRecord,
};
use crate::backend::error::{AccountError, AccountResult};
use crate::backend::store::{
    new_token_key, RefreshTokenStore, SessionStore, UserMetadataStore, UserStore,
};

/// Account records held in memory
///
/// Serves both [`UserStore`] and [`UserMetadataStore`]: profile fields live on
/// the same record as the credentials.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, record: UserRecord) -> AccountResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == record.email) {
            return Err(AccountError::conflict(
                "MemoryUserStore.insert",
                format!("user with email ({}) exists", record.email),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: record.name,
            email: record.email,
            password_hash: record.password_hash,
            avatar_url: None,
            created_at: now,
            modified_at: now,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AccountResult<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| {
                AccountError::not_found("MemoryUserStore.find_by_email", "user does not exist")
            })
    }

    async fn find_by_id(&self, id: Uuid) -> AccountResult<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| {
                AccountError::not_found("MemoryUserStore.find_by_id", "user does not exist")
            })
    }
}

#[async_trait]
impl UserMetadataStore for MemoryUserStore {
    async fn get(&self, user_id: Uuid) -> AccountResult<UserMetadata> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == user_id)
            .map(UserMetadata::from)
            .ok_or_else(|| AccountError::not_found("MemoryUserStore.get", "user does not exist"))
    }

    async fn update(&self, metadata: UserMetadata) -> AccountResult<UserMetadata> {
        let mut users = self.users.write().await;

        let user = users
            .iter_mut()
            .find(|u| u.id == metadata.user_id)
            .ok_or_else(|| AccountError::not_found("MemoryUserStore.update", "user does not exist"))?;

        user.name = metadata.display_name;
        user.avatar_url = metadata.avatar_url;
        user.modified_at = Utc::now();

        Ok(UserMetadata::from(&*user))
    }
}

/// Sessions or refresh tokens held in memory
///
/// Records are never purged on expiry; the auth service compares
/// `expires_at` on every read.
#[derive(Debug)]
pub struct MemoryTokenStore<T> {
    records: RwLock<Vec<T>>,
    ttl: Duration,
}

pub type MemorySessionStore = MemoryTokenStore<Session>;
pub type MemoryRefreshTokenStore = MemoryTokenStore<RefreshToken>;

impl<T: TokenRecord> MemoryTokenStore<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn create_record(&self, user_id: Uuid) -> T {
        let record = T::issue(new_token_key(), user_id, Utc::now() + self.ttl);
        self.records.write().await.push(record.clone());
        record
    }

    async fn get_record(&self, op: &'static str, key: &str) -> AccountResult<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.key() == key)
            .cloned()
            .ok_or_else(|| AccountError::not_found(op, format!("{} does not exist", T::KIND)))
    }

    async fn delete_record(&self, op: &'static str, key: &str) -> AccountResult<()> {
        let mut records = self.records.write().await;

        let pos = records
            .iter()
            .position(|r| r.key() == key)
            .ok_or_else(|| AccountError::not_found(op, format!("{} does not exist", T::KIND)))?;
        records.remove(pos);

        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemoryTokenStore<Session> {
    async fn create(&self, user_id: Uuid) -> AccountResult<Session> {
        Ok(self.create_record(user_id).await)
    }

    async fn get(&self, session_id: &str) -> AccountResult<Session> {
        self.get_record("MemorySessionStore.get", session_id).await
    }

    async fn delete(&self, session_id: &str) -> AccountResult<()> {
        self.delete_record("MemorySessionStore.delete", session_id).await
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryTokenStore<RefreshToken> {
    async fn create(&self, user_id: Uuid) -> AccountResult<RefreshToken> {
        Ok(self.create_record(user_id).await)
    }

    async fn get(&self, token: &str) -> AccountResult<RefreshToken> {
        self.get_record("MemoryRefreshTokenStore.get", token).await
    }

    async fn delete(&self, token: &str) -> AccountResult<()> {
        self.delete_record("MemoryRefreshTokenStore.delete", token).await
    }
}
