/**
 * Signup Handler
 *
 * POST /users/signup
 *
 * # Registration Process
 *
 * 1. Validate name, email format and password length
 * 2. Hand the candidate to the auth service, which hashes and inserts
 * 3. Return the created user without credentials
 *
 * A taken email surfaces as the store's CONFLICT and maps to 400.
 */

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, response::Json};

use crate::backend::auth::domain::NewUser;
use crate::backend::auth::handlers::types::{SignupRequest, UserResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::shared::validation::{require, validate_email, validate_password};

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - malformed body, failed validation or email taken
/// * `500 Internal Server Error` - hashing or storage failure
///
/// # Example Request
///
/// ```http
/// POST /users/signup HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Ada", "email": "ada@example.com", "password": "password1" }
/// ```
pub async fn signup(
    State(auth): State<Arc<AuthService>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    let Json(request) = payload?;

    require("name", &request.name)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    tracing::debug!(email = %request.email, "Signup request");

    let user = auth
        .sign_up(NewUser {
            name: request.name.trim().to_string(),
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
