/**
 * Login Handler
 *
 * POST /users/login
 *
 * Checks the credentials through the auth service and returns whatever the
 * configured strategy mints: an access and refresh token pair in the body,
 * or a session ID in an HttpOnly `session` cookie.
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;

use crate::backend::auth::domain::{IssuedCredentials, Session};
use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::SESSION_COOKIE;
use crate::shared::validation::require;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - malformed body, unknown email or wrong password
/// * `500 Internal Server Error` - token or session could not be created
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, BackendError> {
    let Json(request) = payload?;

    require("email", &request.email)?;
    require("password", &request.password)?;

    let (user, credentials) = auth.log_in(&request.email, &request.password).await?;

    let response = match credentials {
        IssuedCredentials::Tokens {
            access_token,
            refresh_token,
            ..
        } => Json(LoginResponse {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            user_id: user.id.to_string(),
        })
        .into_response(),
        IssuedCredentials::Session(session) => (
            [(SET_COOKIE, session_cookie(&session))],
            Json(LoginResponse {
                access_token: None,
                refresh_token: None,
                user_id: user.id.to_string(),
            }),
        )
            .into_response(),
    };

    Ok(response)
}

fn session_cookie(session: &Session) -> String {
    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, session.id, max_age
    )
}
