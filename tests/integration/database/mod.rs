//! Backend-backed tests
//!
//! Ignored by default; they need PostgreSQL at `DATABASE_URL` and Redis at
//! `REDIS_ADDR`.

mod backed_app_test;
