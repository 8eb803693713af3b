//! Account Handlers Module
//!
//! HTTP handlers for the `/users` endpoints. Each handler validates its
//! payload, calls one service method and shapes the response; failures are
//! returned as [`BackendError`](crate::backend::error::BackendError).
//!
//! # Handlers
//!
//! - **`signup`** - POST /users/signup
//! - **`login`** - POST /users/login
//! - **`logout`** - POST /users/logout (authenticated)
//! - **`refresh`** - POST /users/refresh
//! - **`get_profile`** - GET /users/{user_id}
//! - **`update_profile`** - PUT /users/{user_id} (authenticated, own profile)

/// Request and response types
pub mod types;

pub mod signup;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod profile;

pub use types::{
    LoginRequest, LoginResponse, LogoutRequest, ProfileResponse, RefreshRequest,
    RefreshResponse, SignupRequest, UpdateProfileRequest, UserResponse,
};

pub use login::login;
pub use logout::logout;
pub use profile::{get_profile, update_profile};
pub use refresh::refresh;
pub use signup::signup;
