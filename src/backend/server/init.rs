/**
 * Server Initialization
 *
 * Turns a validated [`ServerConfig`] into a ready router.
 *
 * # Initialization Process
 *
 * 1. Build the user store (connect to Postgres and run migrations, or memory)
 * 2. Build the session or refresh-token store (connect to Redis, or memory)
 * 3. Assemble the auth and user services around the stores
 * 4. Create the router
 *
 * Unlike configuration, a backend that cannot be reached is fatal here: the
 * server does not start half-configured.
 */

use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use sqlx::PgPool;
use thiserror::Error;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::service::{AuthService, TokenStrategy};
use crate::backend::auth::tokens::JwtSigner;
use crate::backend::auth::users::UserService;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{ServerConfig, TokenBackend, TokenMode, UserBackend};
use crate::backend::server::state::AppState;
use crate::backend::store::{
    self, MemoryRefreshTokenStore, MemorySessionStore, MemoryUserStore, PgUserStore,
    RedisRefreshTokenStore, RedisSessionStore, RefreshTokenStore, SessionStore,
    UserMetadataStore, UserStore,
};

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("failed to connect to redis: {0}")]
    Redis(#[from] ::redis::RedisError),
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing users backend server");

    let app_state = build_state(config).await?;
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}

/// Build the services with the stores the configuration selects
pub async fn build_state(config: &ServerConfig) -> Result<AppState, InitError> {
    let (users, metadata): (Arc<dyn UserStore>, Arc<dyn UserMetadataStore>) =
        match &config.user_backend {
            UserBackend::Postgres { database_url } => {
                let pg = Arc::new(connect_database(database_url).await?);
                (pg.clone() as Arc<dyn UserStore>, pg as Arc<dyn UserMetadataStore>)
            }
            UserBackend::Memory => {
                tracing::warn!("Using in-memory user store; accounts are lost on restart");
                let memory = Arc::new(MemoryUserStore::new());
                (memory.clone() as Arc<dyn UserStore>, memory as Arc<dyn UserMetadataStore>)
            }
        };

    let strategy = build_strategy(&config.token_mode, &config.token_backend).await?;
    tracing::info!(strategy = strategy.name(), "Token strategy selected");

    let auth = AuthService::new(users, strategy, PasswordHasher::new(config.bcrypt_cost));
    Ok(AppState::new(auth, UserService::new(metadata)))
}

async fn build_strategy(mode: &TokenMode, backend: &TokenBackend) -> Result<TokenStrategy, InitError> {
    let strategy = match mode {
        TokenMode::Session { ttl } => TokenStrategy::Session(session_store(backend, *ttl).await?),
        TokenMode::Jwt {
            secret,
            access_ttl,
            refresh_ttl,
        } => TokenStrategy::Jwt {
            access: JwtSigner::new(secret, *access_ttl),
            refresh: refresh_store(backend, *refresh_ttl).await?,
        },
    };
    Ok(strategy)
}

async fn session_store(backend: &TokenBackend, ttl: Duration) -> Result<Arc<dyn SessionStore>, InitError> {
    let sessions: Arc<dyn SessionStore> = match backend {
        TokenBackend::Redis { addr, password } => {
            let conn = store::redis::connect(addr, password.as_deref()).await?;
            tracing::info!("Connected to redis session store");
            Arc::new(RedisSessionStore::new(conn, ttl))
        }
        TokenBackend::Memory => Arc::new(MemorySessionStore::new(ttl)),
    };
    Ok(sessions)
}

async fn refresh_store(
    backend: &TokenBackend,
    ttl: Duration,
) -> Result<Arc<dyn RefreshTokenStore>, InitError> {
    let tokens: Arc<dyn RefreshTokenStore> = match backend {
        TokenBackend::Redis { addr, password } => {
            let conn = store::redis::connect(addr, password.as_deref()).await?;
            tracing::info!("Connected to redis refresh token store");
            Arc::new(RedisRefreshTokenStore::new(conn, ttl))
        }
        TokenBackend::Memory => Arc::new(MemoryRefreshTokenStore::new(ttl)),
    };
    Ok(tokens)
}

/// Connect to PostgreSQL and bring the schema up to date
pub async fn connect_database(database_url: &str) -> Result<PgUserStore, InitError> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await?;
    tracing::info!("Database connection pool created successfully");

    let users = PgUserStore::new(pool);
    tracing::info!("Running database migrations...");
    users.migrate().await?;
    tracing::info!("Database migrations completed successfully");

    Ok(users)
}
