/**
 * Application State Management
 *
 * The services every handler may need, shared behind `Arc`. The stores they
 * wrap were chosen at startup and injected; nothing here is global.
 *
 * The `FromRef` implementations let handlers extract just the service they
 * use, e.g. `State(auth): State<Arc<AuthService>>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::UserService;

/// Application state shared across all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Sign-up, login, logout, authentication and token renewal
    pub auth: Arc<AuthService>,
    /// Profile reads and updates
    pub users: Arc<UserService>,
}

impl AppState {
    pub fn new(auth: AuthService, users: UserService) -> Self {
        Self {
            auth: Arc::new(auth),
            users: Arc::new(users),
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}
