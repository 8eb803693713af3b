/**
 * Server Configuration
 *
 * Loaded once at startup from the environment (after `.env` is applied by
 * `main`). Every value is validated before any connection is opened; a
 * missing required value or an unparsable one is a [`ConfigError`].
 *
 * # Variables
 *
 * | Variable | Default |
 * |---|---|
 * | `PORT` | required |
 * | `USER_STORE` | `postgres` (`postgres` or `memory`) |
 * | `TOKEN_STRATEGY` | `jwt` (`jwt` or `session`) |
 * | `TOKEN_STORE` | `redis` (`redis` or `memory`) |
 * | `DATABASE_URL` | required for `postgres` |
 * | `REDIS_ADDR` | required for `redis` |
 * | `REDIS_PASSWORD` | none |
 * | `JWT_SECRET` | required for `jwt` |
 * | `ACCESS_TOKEN_TTL_SECS` | 600 |
 * | `REFRESH_TOKEN_TTL_SECS` | 604800 |
 * | `SESSION_TTL_SECS` | 600 |
 * | `BCRYPT_COST` | bcrypt's default |
 */

use std::str::FromStr;

use chrono::Duration;
use thiserror::Error;

use crate::backend::auth::password::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};

pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 600;
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
pub const DEFAULT_SESSION_TTL_SECS: i64 = 600;

/// Upper bound for any token lifetime (ten years)
pub const MAX_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration value: {0}")]
    MissingValue(&'static str),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where user accounts live
#[derive(Clone, PartialEq, Eq)]
pub enum UserBackend {
    Postgres { database_url: String },
    Memory,
}

/// Where sessions or refresh tokens live
#[derive(Clone, PartialEq, Eq)]
pub enum TokenBackend {
    Redis { addr: String, password: Option<String> },
    Memory,
}

/// Which token strategy the auth service runs
#[derive(Clone, PartialEq, Eq)]
pub enum TokenMode {
    Jwt {
        secret: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    },
    Session { ttl: Duration },
}

impl std::fmt::Debug for UserBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres { .. } => f.write_str("Postgres"),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

impl std::fmt::Debug for TokenBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Redis { addr, .. } => f
                .debug_struct("Redis")
                .field("addr", &redacted_addr(addr))
                .finish_non_exhaustive(),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

/// Address with any `user:password@` part removed
fn redacted_addr(addr: &str) -> &str {
    addr.rsplit_once('@').map_or(addr, |(_, host)| host)
}

impl std::fmt::Debug for TokenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jwt {
                access_ttl,
                refresh_ttl,
                ..
            } => f
                .debug_struct("Jwt")
                .field("access_ttl", access_ttl)
                .field("refresh_ttl", refresh_ttl)
                .finish_non_exhaustive(),
            Self::Session { ttl } => f.debug_struct("Session").field("ttl", ttl).finish(),
        }
    }
}

/// Validated server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub user_backend: UserBackend,
    pub token_mode: TokenMode,
    pub token_backend: TokenBackend,
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key-value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut builder = Self::builder();

        if let Some(port) = get("PORT") {
            builder = builder.port(parse("PORT", &port)?);
        }
        if let Some(value) = get("USER_STORE") {
            builder = builder.user_store(value);
        }
        if let Some(value) = get("TOKEN_STRATEGY") {
            builder = builder.token_strategy(value);
        }
        if let Some(value) = get("TOKEN_STORE") {
            builder = builder.token_store(value);
        }
        if let Some(value) = get("DATABASE_URL") {
            builder = builder.database_url(value);
        }
        if let Some(value) = get("REDIS_ADDR") {
            builder = builder.redis_addr(value);
        }
        if let Some(value) = get("REDIS_PASSWORD") {
            builder = builder.redis_password(value);
        }
        if let Some(value) = get("JWT_SECRET") {
            builder = builder.jwt_secret(value);
        }
        if let Some(value) = get("ACCESS_TOKEN_TTL_SECS") {
            builder = builder.access_token_ttl_secs(parse("ACCESS_TOKEN_TTL_SECS", &value)?);
        }
        if let Some(value) = get("REFRESH_TOKEN_TTL_SECS") {
            builder = builder.refresh_token_ttl_secs(parse("REFRESH_TOKEN_TTL_SECS", &value)?);
        }
        if let Some(value) = get("SESSION_TTL_SECS") {
            builder = builder.session_ttl_secs(parse("SESSION_TTL_SECS", &value)?);
        }
        if let Some(value) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse("BCRYPT_COST", &value)?);
        }

        builder.build()
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn positive_ttl(key: &'static str, secs: Option<i64>, default: i64) -> Result<Duration, ConfigError> {
    let secs = secs.unwrap_or(default);
    if !(1..=MAX_TTL_SECS).contains(&secs) {
        return Err(ConfigError::InvalidValue {
            key,
            value: secs.to_string(),
        });
    }
    Duration::try_seconds(secs).ok_or_else(|| ConfigError::InvalidValue {
        key,
        value: secs.to_string(),
    })
}

/// Collects raw settings; [`build`](Self::build) validates them
#[derive(Debug, Default, Clone)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    user_store: Option<String>,
    token_strategy: Option<String>,
    token_store: Option<String>,
    database_url: Option<String>,
    redis_addr: Option<String>,
    redis_password: Option<String>,
    jwt_secret: Option<String>,
    access_token_ttl_secs: Option<i64>,
    refresh_token_ttl_secs: Option<i64>,
    session_ttl_secs: Option<i64>,
    bcrypt_cost: Option<u32>,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// `postgres` or `memory`
    pub fn user_store(mut self, kind: impl Into<String>) -> Self {
        self.user_store = Some(kind.into());
        self
    }

    /// `jwt` or `session`
    pub fn token_strategy(mut self, kind: impl Into<String>) -> Self {
        self.token_strategy = Some(kind.into());
        self
    }

    /// `redis` or `memory`
    pub fn token_store(mut self, kind: impl Into<String>) -> Self {
        self.token_store = Some(kind.into());
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn redis_addr(mut self, addr: impl Into<String>) -> Self {
        self.redis_addr = Some(addr.into());
        self
    }

    pub fn redis_password(mut self, password: impl Into<String>) -> Self {
        self.redis_password = Some(password.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn access_token_ttl_secs(mut self, secs: i64) -> Self {
        self.access_token_ttl_secs = Some(secs);
        self
    }

    pub fn refresh_token_ttl_secs(mut self, secs: i64) -> Self {
        self.refresh_token_ttl_secs = Some(secs);
        self
    }

    pub fn session_ttl_secs(mut self, secs: i64) -> Self {
        self.session_ttl_secs = Some(secs);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let port = self.port.ok_or(ConfigError::MissingValue("PORT"))?;

        let user_backend = match self.user_store.as_deref().unwrap_or("postgres") {
            "postgres" => UserBackend::Postgres {
                database_url: self
                    .database_url
                    .ok_or(ConfigError::MissingValue("DATABASE_URL"))?,
            },
            "memory" => UserBackend::Memory,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "USER_STORE",
                    value: other.to_string(),
                })
            }
        };

        let token_mode = match self.token_strategy.as_deref().unwrap_or("jwt") {
            "jwt" => TokenMode::Jwt {
                secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
                access_ttl: positive_ttl(
                    "ACCESS_TOKEN_TTL_SECS",
                    self.access_token_ttl_secs,
                    DEFAULT_ACCESS_TOKEN_TTL_SECS,
                )?,
                refresh_ttl: positive_ttl(
                    "REFRESH_TOKEN_TTL_SECS",
                    self.refresh_token_ttl_secs,
                    DEFAULT_REFRESH_TOKEN_TTL_SECS,
                )?,
            },
            "session" => TokenMode::Session {
                ttl: positive_ttl("SESSION_TTL_SECS", self.session_ttl_secs, DEFAULT_SESSION_TTL_SECS)?,
            },
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "TOKEN_STRATEGY",
                    value: other.to_string(),
                })
            }
        };

        let token_backend = match self.token_store.as_deref().unwrap_or("redis") {
            "redis" => TokenBackend::Redis {
                addr: self.redis_addr.ok_or(ConfigError::MissingValue("REDIS_ADDR"))?,
                password: self.redis_password,
            },
            "memory" => TokenBackend::Memory,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "TOKEN_STORE",
                    value: other.to_string(),
                })
            }
        };

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST);
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(ServerConfig {
            port,
            user_backend,
            token_mode,
            token_backend,
            bcrypt_cost,
        })
    }
}
