//! Authentication API integration tests
//!
//! Signup, login, logout and refresh through the router, for both token
//! strategies.

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{unique_email, Credential, ResponseExt, TestApp, TEST_PASSWORD};
use crate::{assert_error_contains, assert_status};

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::jwt().await;

    let response = app.signup("Ada", "a@b.com", "password1").await;

    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.json_body()["email"], "a@b.com");
    assert_eq!(response.json_body()["name"], "Ada");
    assert!(!response.str_field("id").is_empty());
    assert!(response.json_body().get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::jwt().await;

    let first = app.signup("Ada", "a@b.com", "password1").await;
    assert_status!(first, StatusCode::CREATED);

    let second = app.signup("Ada", "a@b.com", "password1").await;
    assert_status!(second, StatusCode::BAD_REQUEST);
    assert_error_contains!(second, "exists");
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::jwt().await;

    let bad_email = app.signup("Ada", "not-an-email", "password1").await;
    assert_status!(bad_email, StatusCode::BAD_REQUEST);
    assert_error_contains!(bad_email, "email");

    let short_password = app.signup("Ada", &unique_email(), "short").await;
    assert_status!(short_password, StatusCode::BAD_REQUEST);
    assert_error_contains!(short_password, "password");

    let no_name = app.signup("  ", &unique_email(), "password1").await;
    assert_status!(no_name, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_malformed_body() {
    let app = TestApp::jwt().await;

    let response = app.post("/users/signup", json!({ "email": "a@b.com" })).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_error_contains!(response, "unable to parse request body");
}

#[tokio::test]
async fn test_login_success_jwt() {
    let app = TestApp::jwt().await;
    let signup = app.signup("Ada", "a@b.com", "password1").await;

    let response = app.login("a@b.com", "password1").await;

    assert_status!(response, StatusCode::OK);
    assert!(!response.str_field("access_token").is_empty());
    assert!(!response.str_field("refresh_token").is_empty());
    assert_eq!(response.str_field("user_id"), signup.str_field("id"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::jwt().await;
    app.signup("Ada", "a@b.com", "password1").await;

    let response = app.login("a@b.com", "password2").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_error_contains!(response, "or password incorrect");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::jwt().await;

    let response = app.login("nobody@b.com", "password1").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_error_contains!(response, "email (nobody@b.com) or password incorrect");
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::jwt().await;
    let user = app.logged_in_user().await;
    let refresh_token = user.refresh_token.clone().unwrap();

    let response = app
        .post("/users/refresh", json!({ "refresh_token": refresh_token }))
        .await;
    assert_status!(response, StatusCode::OK);

    let token = response.str_field("access_token");
    let update = app
        .send(
            Method::PUT,
            &format!("/users/{}", user.id),
            Some(json!({ "display_name": "Refreshed" })),
            Some(&Credential::Bearer(token)),
        )
        .await;
    assert_status!(update, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_unknown_token() {
    let app = TestApp::jwt().await;

    let response = app
        .post("/users/refresh", json!({ "refresh_token": "not-a-token" }))
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = TestApp::jwt().await;
    let user = app.logged_in_user().await;
    let refresh_token = user.refresh_token.clone().unwrap();

    let logout = app
        .send(
            Method::POST,
            "/users/logout",
            Some(json!({ "refresh_token": refresh_token })),
            Some(&user.credential),
        )
        .await;
    assert_status!(logout, StatusCode::NO_CONTENT);

    let refresh = app
        .post("/users/refresh", json!({ "refresh_token": refresh_token }))
        .await;
    assert_status!(refresh, StatusCode::UNAUTHORIZED);

    let again = app
        .send(
            Method::POST,
            "/users/logout",
            Some(json!({ "refresh_token": refresh_token })),
            Some(&user.credential),
        )
        .await;
    assert_status!(again, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_cannot_revoke_other_users_token() {
    let app = TestApp::jwt().await;
    let alice = app.logged_in_user().await;
    let bob = app.logged_in_user().await;
    let bobs_token = bob.refresh_token.clone().unwrap();

    let logout = app
        .send(
            Method::POST,
            "/users/logout",
            Some(json!({ "refresh_token": bobs_token })),
            Some(&alice.credential),
        )
        .await;
    assert_status!(logout, StatusCode::BAD_REQUEST);

    let refresh = app
        .post("/users/refresh", json!({ "refresh_token": bobs_token }))
        .await;
    assert_status!(refresh, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_requires_credentials() {
    let app = TestApp::jwt().await;

    let response = app
        .send(
            Method::POST,
            "/users/logout",
            Some(json!({ "refresh_token": "anything" })),
            None,
        )
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_refresh_token() {
    let app = TestApp::jwt().await;
    let user = app.logged_in_user().await;

    let response = app
        .send(Method::POST, "/users/logout", None, Some(&user.credential))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tampered_access_token_rejected() {
    let app = TestApp::jwt().await;
    let user = app.logged_in_user().await;

    let response = app
        .send(
            Method::PUT,
            &format!("/users/{}", user.id),
            Some(json!({ "display_name": "Mallory" })),
            Some(&Credential::Bearer("not.a.jwt".to_string())),
        )
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_access_token_rejected() {
    let app = TestApp::jwt_with_access_ttl(chrono::Duration::seconds(-30));
    let user = app.logged_in_user().await;

    let response = app
        .send(
            Method::PUT,
            &format!("/users/{}", user.id),
            Some(json!({ "display_name": "Late" })),
            Some(&user.credential),
        )
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert_error_contains!(response, "expired");

    let logout = app
        .send(
            Method::POST,
            "/users/logout",
            Some(json!({ "refresh_token": user.refresh_token.clone().unwrap() })),
            Some(&user.credential),
        )
        .await;
    assert_status!(logout, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_session_sets_cookie() {
    let app = TestApp::session().await;
    let email = unique_email();
    let signup = app.signup("Ada", &email, TEST_PASSWORD).await;

    let response = app.login(&email, TEST_PASSWORD).await;

    assert_status!(response, StatusCode::OK);
    assert!(response.session_cookie().is_some());
    assert_eq!(response.str_field("user_id"), signup.str_field("id"));
    assert!(response.json_body().get("access_token").is_none());
}

#[tokio::test]
async fn test_session_logout_invalidates_session() {
    let app = TestApp::session().await;
    let user = app.logged_in_user().await;

    let logout = app
        .send(Method::POST, "/users/logout", None, Some(&user.credential))
        .await;
    assert_status!(logout, StatusCode::NO_CONTENT);

    let reuse = app
        .send(
            Method::PUT,
            &format!("/users/{}", user.id),
            Some(json!({ "display_name": "Ghost" })),
            Some(&user.credential),
        )
        .await;
    assert_status!(reuse, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_session_strategy() {
    let app = TestApp::session().await;

    let response = app
        .post("/users/refresh", json!({ "refresh_token": "anything" }))
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::jwt().await;

    let response = app.send(Method::GET, "/nope", None, None).await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert_error_contains!(response, "route not found");
}
