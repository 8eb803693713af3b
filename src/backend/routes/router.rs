/**
 * Router Configuration
 *
 * Assembles the account routes, the request-tracing layer and a JSON 404
 * fallback into one router.
 */

use axum::{http::StatusCode, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Services shared by every handler
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new());

    router
        .fallback(not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

async fn not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "route not found")
}
