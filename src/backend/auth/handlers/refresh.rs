/**
 * Refresh Handler
 *
 * POST /users/refresh
 *
 * Trades a refresh token for a new access token. The refresh token itself is
 * not rotated.
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{RefreshRequest, RefreshResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::shared::validation::require;

/// # Errors
///
/// * `401 Unauthorized` - unknown, revoked or expired refresh token
pub async fn refresh(
    State(auth): State<Arc<AuthService>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>, BackendError> {
    let Json(request) = payload?;
    require("refresh_token", &request.refresh_token)?;

    let access_token = auth.regenerate_access_token(&request.refresh_token).await?;
    Ok(Json(RefreshResponse { access_token }))
}
