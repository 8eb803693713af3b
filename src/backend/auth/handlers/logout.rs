/**
 * Logout Handler
 *
 * POST /users/logout
 *
 * Requires an authenticated caller. With sessions the caller's own session
 * is deleted and the body may be empty; with JWTs the body names the refresh
 * token to revoke, which must belong to the caller.
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::handlers::types::LogoutRequest;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::{AuthUser, SESSION_COOKIE};

/// Logout handler
///
/// # Errors
///
/// * `401 Unauthorized` - no valid credentials presented
/// * `400 Bad Request` - nothing to revoke, already revoked, or held by another user
pub async fn logout(
    State(auth): State<Arc<AuthService>>,
    AuthUser(claims): AuthUser,
    payload: Result<Json<LogoutRequest>, JsonRejection>,
) -> Result<Response, BackendError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => LogoutRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let is_session = claims.session_id.is_some();
    let credential = claims
        .session_id
        .or(request.refresh_token)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| BackendError::handler(StatusCode::BAD_REQUEST, "refresh_token is required"))?;

    auth.log_out_as(claims.user_id, &credential).await?;
    tracing::info!(user_id = %claims.user_id, "User logged out");

    if is_session {
        let expire = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE);
        return Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, expire)]).into_response());
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}
