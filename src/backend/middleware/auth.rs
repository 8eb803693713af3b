/**
 * Authentication Extractor
 *
 * Resolves the caller's identity for protected handlers. The credential is
 * read from `Authorization: Bearer <token>` (a bare token is accepted too),
 * falling back to the `session` cookie, and is checked by the auth service.
 * Handlers receive the typed [`AccessClaims`] directly.
 */

use axum::{
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap, StatusCode,
    },
};

use crate::backend::auth::domain::AccessClaims;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Name of the cookie carrying the session ID
pub const SESSION_COOKIE: &str = "session";

/// Axum extractor for an authenticated caller
///
/// Rejects with 401 when no credential is presented, and with the mapped
/// status of the auth service's error otherwise.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AccessClaims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = presented_credential(&parts.headers).ok_or_else(|| {
            tracing::debug!("Missing credentials");
            BackendError::handler(StatusCode::UNAUTHORIZED, "missing credentials")
        })?;

        let claims = state.auth.authenticate(&presented).await.map_err(|e| {
            tracing::debug!(error = %e, "Rejected credentials");
            BackendError::from(e)
        })?;

        Ok(AuthUser(claims))
    }
}

/// Credential presented with a request, if any
pub fn presented_credential(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| session_cookie(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => value.trim(),
    };
    (!token.is_empty()).then(|| token.to_string())
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
