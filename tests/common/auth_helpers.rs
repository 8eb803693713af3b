//! Authentication test helpers
//!
//! Builds the full router over in-memory stores and serves it through
//! `axum_test::TestServer`, so no port is bound and no backend is needed.

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    Router,
};
use axum_test::{TestResponse, TestServer};
use chrono::Duration;
use kanban_users::backend::auth::password::MIN_BCRYPT_COST;
use kanban_users::backend::auth::{AuthService, JwtSigner, PasswordHasher, TokenStrategy, UserService};
use kanban_users::backend::routes::create_router;
use kanban_users::backend::server::{create_app, AppState, ServerConfig};
use kanban_users::backend::store::{MemoryRefreshTokenStore, MemoryUserStore};
use std::sync::Arc;
use serde_json::Value;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password1";

/// JSON accessors for responses from the app under test
pub trait ResponseExt {
    /// Response body as JSON, `Null` when empty
    fn json_body(&self) -> Value;

    /// Value of the `session` cookie set by this response
    fn session_cookie(&self) -> Option<String>;

    fn str_field(&self, field: &str) -> String;
}

impl ResponseExt for TestResponse {
    fn json_body(&self) -> Value {
        if self.text().is_empty() {
            Value::Null
        } else {
            self.json()
        }
    }

    fn session_cookie(&self) -> Option<String> {
        self.maybe_cookie("session")
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    fn str_field(&self, field: &str) -> String {
        let body = self.json_body();
        body[field]
            .as_str()
            .unwrap_or_else(|| panic!("missing string field {field} in {body}"))
            .to_string()
    }
}

/// Credential attached to a request
#[derive(Debug, Clone)]
pub enum Credential {
    Bearer(String),
    SessionCookie(String),
}

/// Test server over the full router
pub struct TestApp {
    server: TestServer,
}

impl TestApp {
    /// JWT access tokens with in-memory refresh tokens
    pub async fn jwt() -> Self {
        Self::with_config(
            ServerConfig::builder()
                .token_strategy("jwt")
                .jwt_secret("integration-test-secret"),
        )
        .await
    }

    /// Server-held sessions in memory
    pub async fn session() -> Self {
        Self::with_config(ServerConfig::builder().token_strategy("session")).await
    }

    /// JWT strategy whose access tokens live for `access_ttl`
    ///
    /// Bypasses configuration so a negative lifetime can mint tokens that
    /// are already expired.
    pub fn jwt_with_access_ttl(access_ttl: Duration) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let auth = AuthService::new(
            users.clone(),
            TokenStrategy::Jwt {
                access: JwtSigner::new("integration-test-secret", access_ttl),
                refresh: Arc::new(MemoryRefreshTokenStore::new(Duration::days(7))),
            },
            PasswordHasher::new(MIN_BCRYPT_COST),
        );
        let state = AppState::new(auth, UserService::new(users));
        Self::from_router(create_router(state))
    }

    /// Serve an already-built router
    pub fn from_router(router: Router) -> Self {
        let server = TestServer::new(router).expect("start test server");
        Self { server }
    }

    async fn with_config(builder: kanban_users::backend::server::ServerConfigBuilder) -> Self {
        let config = builder
            .port(0)
            .user_store("memory")
            .token_store("memory")
            .bcrypt_cost(MIN_BCRYPT_COST)
            .build()
            .expect("valid test configuration");

        let router = create_app(&config).await.expect("build test app");
        Self::from_router(router)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        credential: Option<&Credential>,
    ) -> TestResponse {
        let mut request = self.server.method(method, uri);

        match credential {
            Some(Credential::Bearer(token)) => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .expect("valid authorization header");
                request = request.add_header(header::AUTHORIZATION, value);
            }
            Some(Credential::SessionCookie(id)) => {
                let value = HeaderValue::from_str(&format!("session={}", id))
                    .expect("valid cookie header");
                request = request.add_header(header::COOKIE, value);
            }
            None => {}
        }

        if let Some(json) = body {
            request = request.json(&json);
        }

        request.await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> TestResponse {
        self.post(
            "/users/signup",
            serde_json::json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post(
            "/users/login",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Sign up a fresh user and log them in
    pub async fn logged_in_user(&self) -> TestUser {
        let email = unique_email();
        let signup = self.signup("Test User", &email, TEST_PASSWORD).await;
        assert_eq!(signup.status_code(), StatusCode::CREATED, "signup failed: {}", signup.text());

        let login = self.login(&email, TEST_PASSWORD).await;
        assert_eq!(login.status_code(), StatusCode::OK, "login failed: {}", login.text());

        let credential = match login.session_cookie() {
            Some(id) => Credential::SessionCookie(id),
            None => Credential::Bearer(login.str_field("access_token")),
        };

        TestUser {
            id: login.str_field("user_id"),
            email,
            refresh_token: login.json_body()["refresh_token"].as_str().map(str::to_string),
            credential,
        }
    }
}

/// A signed-up, logged-in user
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub email: String,
    /// Set with JWTs only
    pub refresh_token: Option<String>,
    pub credential: Credential,
}

pub fn unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4().simple())
}
