/**
 * Account Routes
 *
 * ## Public
 * - `POST /users/signup` - User registration
 * - `POST /users/login` - User login
 * - `POST /users/refresh` - New access token from a refresh token
 * - `GET /users/{user_id}` - Public profile
 *
 * ## Authenticated
 * - `POST /users/logout` - Revoke the caller's session or refresh token
 * - `PUT /users/{user_id}` - Update the caller's own profile
 *
 * Authentication is enforced by the `AuthUser` extractor in each protected
 * handler.
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{
    get_profile, login, logout, refresh, signup, update_profile,
};
use crate::backend::server::state::AppState;

/// Configure account routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
        .route("/users/logout", post(logout))
        .route("/users/refresh", post(refresh))
        .route("/users/{user_id}", get(get_profile).put(update_profile))
}
