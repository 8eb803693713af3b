/**
 * User Profiles
 *
 * Read and update the public profile of an account. Who may update which
 * profile is decided by the handler, not here.
 */

use std::sync::Arc;

use crate::backend::auth::domain::{parse_user_id, UserMetadata};
use crate::backend::error::AccountResult;
use crate::backend::store::UserMetadataStore;

pub struct UserService {
    metadata: Arc<dyn UserMetadataStore>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    pub fn new(metadata: Arc<dyn UserMetadataStore>) -> Self {
        Self { metadata }
    }

    /// Profile of the user with this ID
    ///
    /// `INVALID` if `user_id` is not a UUID, `NOT_FOUND` if no such user.
    pub async fn find(&self, user_id: &str) -> AccountResult<UserMetadata> {
        let op = "UserService.find";
        let user_id = parse_user_id(op, user_id)?;
        self.metadata.get(user_id).await.map_err(|e| e.within(op))
    }

    pub async fn update(&self, metadata: UserMetadata) -> AccountResult<UserMetadata> {
        let updated = self
            .metadata
            .update(metadata)
            .await
            .map_err(|e| e.within("UserService.update"))?;

        tracing::info!(user_id = %updated.user_id, "Profile updated");
        Ok(updated)
    }
}
