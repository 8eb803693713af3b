/**
 * Profile Handlers
 *
 * GET /users/{user_id} is public. PUT /users/{user_id} requires the caller to
 * be that user.
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::domain::{parse_user_id, UserMetadata};
use crate::backend::auth::handlers::types::{ProfileResponse, UpdateProfileRequest};
use crate::backend::auth::users::UserService;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::validation::validate_display_name;

/// Get a user's public profile
///
/// # Errors
///
/// * `401 Unauthorized` - `user_id` is not a UUID
/// * `400 Bad Request` - no such user
pub async fn get_profile(
    State(users): State<Arc<UserService>>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, BackendError> {
    let profile = users.find(&user_id).await?;
    Ok(Json(profile.into()))
}

/// Update the caller's own profile
///
/// # Errors
///
/// * `403 Forbidden` - `user_id` is someone else
/// * `400 Bad Request` - malformed body or display name out of range
pub async fn update_profile(
    State(users): State<Arc<UserService>>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<ProfileResponse>, BackendError> {
    let target = parse_user_id("update_profile", &user_id)?;
    if target != claims.user_id {
        tracing::warn!(caller = %claims.user_id, target = %target, "Profile update for another user");
        return Err(BackendError::handler(
            StatusCode::FORBIDDEN,
            "cannot update another user's profile",
        ));
    }

    let Json(request) = payload?;
    validate_display_name(&request.display_name)?;

    let profile_url = request.profile_url.filter(|url| !url.trim().is_empty());
    let updated = users
        .update(UserMetadata {
            user_id: target,
            display_name: request.display_name.trim().to_string(),
            avatar_url: profile_url,
        })
        .await?;

    Ok(Json(updated.into()))
}
