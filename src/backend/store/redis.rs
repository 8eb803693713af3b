/**
 * Redis Token Store
 *
 * Sessions and refresh tokens stored as JSON under `<kind>:<key>` with a
 * Redis TTL equal to the record's lifetime, so Redis drops them on its own
 * once they expire.
 */

use std::marker::PhantomData;

use ::redis::aio::ConnectionManager;
use ::redis::{AsyncCommands, IntoConnectionInfo};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::backend::auth::domain::{RefreshToken, Session, TokenRecord};
use crate::backend::error::{AccountError, AccountResult};
use crate::backend::store::{new_token_key, RefreshTokenStore, SessionStore};

/// Open a managed connection to `addr` (`host:port` or a `redis://` URL)
pub async fn connect(addr: &str, password: Option<&str>) -> Result<ConnectionManager, ::redis::RedisError> {
    let url = if addr.contains("://") {
        addr.to_string()
    } else {
        format!("redis://{}", addr)
    };

    let mut info = url.into_connection_info()?;
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        info.redis.password = Some(password.to_string());
    }

    let client = ::redis::Client::open(info)?;
    ConnectionManager::new(client).await
}

/// Token records in Redis, one key per record
#[derive(Clone)]
pub struct RedisTokenStore<T> {
    conn: ConnectionManager,
    ttl: Duration,
    _kind: PhantomData<fn() -> T>,
}

pub type RedisSessionStore = RedisTokenStore<Session>;
pub type RedisRefreshTokenStore = RedisTokenStore<RefreshToken>;

impl<T> std::fmt::Debug for RedisTokenStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTokenStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<T> RedisTokenStore<T>
where
    T: TokenRecord + Serialize + DeserializeOwned,
{
    pub fn new(conn: ConnectionManager, ttl: Duration) -> Self {
        Self {
            conn,
            ttl,
            _kind: PhantomData,
        }
    }

    fn redis_key(key: &str) -> String {
        format!("{}:{}", T::KIND, key)
    }

    /// Redis rejects a zero expiry, so anything shorter than a second is
    /// rounded up.
    fn ttl_secs(&self) -> u64 {
        u64::try_from(self.ttl.num_seconds()).unwrap_or(0).max(1)
    }

    async fn create_record(&self, op: &'static str, user_id: Uuid) -> AccountResult<T> {
        let record = T::issue(new_token_key(), user_id, Utc::now() + self.ttl);
        let payload = serde_json::to_string(&record).map_err(|e| AccountError::internal(op, e))?;

        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::redis_key(record.key()), payload, self.ttl_secs())
            .await
            .map_err(|e| AccountError::internal(op, e))?;

        Ok(record)
    }

    async fn get_record(&self, op: &'static str, key: &str) -> AccountResult<T> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn
            .get(Self::redis_key(key))
            .await
            .map_err(|e| AccountError::internal(op, e))?;

        let payload =
            payload.ok_or_else(|| AccountError::not_found(op, format!("{} does not exist", T::KIND)))?;

        serde_json::from_str(&payload).map_err(|e| AccountError::internal(op, e))
    }

    async fn delete_record(&self, op: &'static str, key: &str) -> AccountResult<()> {
        let mut conn = self.conn.clone();
        let removed: u64 = conn
            .del(Self::redis_key(key))
            .await
            .map_err(|e| AccountError::internal(op, e))?;

        if removed == 0 {
            return Err(AccountError::not_found(op, format!("{} does not exist", T::KIND)));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for RedisTokenStore<Session> {
    async fn create(&self, user_id: Uuid) -> AccountResult<Session> {
        self.create_record("RedisSessionStore.create", user_id).await
    }

    async fn get(&self, session_id: &str) -> AccountResult<Session> {
        self.get_record("RedisSessionStore.get", session_id).await
    }

    async fn delete(&self, session_id: &str) -> AccountResult<()> {
        self.delete_record("RedisSessionStore.delete", session_id).await
    }
}

#[async_trait]
impl RefreshTokenStore for RedisTokenStore<RefreshToken> {
    async fn create(&self, user_id: Uuid) -> AccountResult<RefreshToken> {
        self.create_record("RedisRefreshTokenStore.create", user_id).await
    }

    async fn get(&self, token: &str) -> AccountResult<RefreshToken> {
        self.get_record("RedisRefreshTokenStore.get", token).await
    }

    async fn delete(&self, token: &str) -> AccountResult<()> {
        self.delete_record("RedisRefreshTokenStore.delete", token).await
    }
}
