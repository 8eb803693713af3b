/**
 * Error Conversion
 *
 * This module turns backend errors into HTTP responses, and converts Axum
 * extractor rejections into backend errors.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "user with email (a@b.com) exists",
 *   "status": 400
 * }
 * ```
 *
 * The full cause chain of an `AccountError` is logged server-side; only the
 * coarse message is sent to the client.
 */

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::{BackendError, ErrorCode};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        match &self {
            BackendError::Account(err) if err.code == ErrorCode::Internal => {
                tracing::warn!("{}", err.report());
            }
            BackendError::Account(err) => {
                tracing::debug!("{}", err.report());
            }
            other => {
                tracing::debug!("{}", other);
            }
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("unable to parse request body. err: {}", rejection.body_text());
        BackendError::handler(StatusCode::BAD_REQUEST, "unable to parse request body")
    }
}
