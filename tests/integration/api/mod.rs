//! API integration tests
//!
//! Integration tests for all API endpoints, over in-memory stores

mod auth_test;
