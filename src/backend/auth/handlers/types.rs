/**
 * Account Handler Types
 *
 * Request and response bodies for the `/users` endpoints. Responses never
 * carry password hashes.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::domain::{User, UserMetadata};

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SignupRequest {
    /// Display name
    pub name: String,
    pub email: String,
    /// Plaintext password (hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
///
/// With JWTs both tokens are set. With sessions only `user_id` is, and the
/// session ID travels in the `session` cookie.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user_id: String,
}

/// Logout request
///
/// Only meaningful for JWTs; with sessions the body may be empty.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Access token renewal request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
        }
    }
}

/// Public profile
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub user_id: String,
    pub display_name: String,
    pub profile_url: Option<String>,
}

impl From<UserMetadata> for ProfileResponse {
    fn from(metadata: UserMetadata) -> Self {
        Self {
            user_id: metadata.user_id.to_string(),
            display_name: metadata.display_name,
            profile_url: metadata.avatar_url,
        }
    }
}

/// Profile update request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UpdateProfileRequest {
    pub display_name: String,
    #[serde(default)]
    pub profile_url: Option<String>,
}
