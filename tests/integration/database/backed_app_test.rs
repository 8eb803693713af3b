//! Full flows against PostgreSQL and Redis

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{backed_app, unique_email, TestApp, TestDatabase, TEST_PASSWORD};
use crate::{assert_error_contains, assert_status};
use kanban_users::backend::store::UserStore;

#[tokio::test]
#[ignore = "requires DATABASE_URL and REDIS_ADDR"]
async fn test_jwt_flow_with_backends() {
    let app = TestApp::from_router(backed_app("jwt").await);
    let user = app.logged_in_user().await;
    let refresh_token = user.refresh_token.clone().unwrap();

    let refresh = app
        .post("/users/refresh", json!({ "refresh_token": refresh_token }))
        .await;
    assert_status!(refresh, StatusCode::OK);

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
}

#[tokio::test]
#[ignore = "requires DATABASE_URL and REDIS_ADDR"]
async fn test_session_flow_with_backends() {
    let app = TestApp::from_router(backed_app("session").await);
    let user = app.logged_in_user().await;

    let logout = app
        .send(Method::POST, "/users/logout", None, Some(&user.credential))
        .await;
    assert_status!(logout, StatusCode::NO_CONTENT);

    let again = app
        .send(Method::POST, "/users/logout", None, Some(&user.credential))
        .await;
    assert_status!(again, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL and REDIS_ADDR"]
async fn test_duplicate_signup_with_backends() {
    let db = TestDatabase::new().await;
    let app = TestApp::from_router(backed_app("jwt").await);
    let email = unique_email();

    let created = app.signup("Ada", &email, TEST_PASSWORD).await;
    assert_status!(created, StatusCode::CREATED);
    let duplicate = app.signup("Ada", &email, TEST_PASSWORD).await;
    assert_status!(duplicate, StatusCode::BAD_REQUEST);
    assert_error_contains!(duplicate, "exists");

    assert!(db.store().find_by_email(&email).await.is_ok());
}
