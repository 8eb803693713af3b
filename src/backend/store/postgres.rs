/**
 * PostgreSQL User Store
 *
 * Durable account records in the `users` table (see `migrations/`). The
 * unique index on `email` makes the insert itself the uniqueness check.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::domain::{User, UserMetadata, UserRecord};
use crate::backend::error::{AccountError, AccountResult};
use crate::backend::store::{UserMetadataStore, UserStore};

/// Row shape of the `users` table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    profile_image_url: Option<String>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            avatar_url: row.profile_image_url,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

/// Users backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the bundled migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, record: UserRecord) -> AccountResult<User> {
        let op = "PgUserStore.insert";
        let now = Utc::now();

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password_hash, profile_image_url, created_at, modified_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AccountError::conflict(op, format!("user with email ({}) exists", record.email))
                    .with_source(e)
            } else {
                AccountError::internal(op, e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_email(&self, email: &str) -> AccountResult<User> {
        let op = "PgUserStore.find_by_email";

        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, profile_image_url, created_at, modified_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::internal(op, e))?
        .map(User::from)
        .ok_or_else(|| AccountError::not_found(op, "user does not exist"))
    }

    async fn find_by_id(&self, id: Uuid) -> AccountResult<User> {
        let op = "PgUserStore.find_by_id";

        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, profile_image_url, created_at, modified_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::internal(op, e))?
        .map(User::from)
        .ok_or_else(|| AccountError::not_found(op, "user does not exist"))
    }
}

#[async_trait]
impl UserMetadataStore for PgUserStore {
    async fn get(&self, user_id: Uuid) -> AccountResult<UserMetadata> {
        self.find_by_id(user_id)
            .await
            .map(|user| UserMetadata::from(&user))
            .map_err(|e| e.within("PgUserStore.get"))
    }

    async fn update(&self, metadata: UserMetadata) -> AccountResult<UserMetadata> {
        let op = "PgUserStore.update";

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = $1, profile_image_url = $2, modified_at = $3
            WHERE id = $4
            RETURNING id, name, email, password_hash, profile_image_url, created_at, modified_at
            "#,
        )
        .bind(&metadata.display_name)
        .bind(&metadata.avatar_url)
        .bind(Utc::now())
        .bind(metadata.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::internal(op, e))?
        .ok_or_else(|| AccountError::not_found(op, "user does not exist"))?;

        Ok(UserMetadata::from(&User::from(row)))
    }
}
