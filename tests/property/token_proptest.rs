//! Property-based tests for access tokens and token stores

use chrono::{Duration, Utc};
use kanban_users::backend::auth::JwtSigner;
use kanban_users::backend::error::ErrorCode;
use kanban_users::backend::store::{MemoryRefreshTokenStore, RefreshTokenStore};
use proptest::prelude::*;
use uuid::Uuid;

fn user_id() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

proptest! {
    #[test]
    fn test_access_token_names_its_user(id in user_id(), ttl in 60i64..86_400) {
        let signer = JwtSigner::new("proptest-secret", Duration::seconds(ttl));
        let token = signer.issue(id).unwrap();
        let claims = signer.verify(&token).unwrap();

        prop_assert_eq!(claims.user_id, id);
        prop_assert!(claims.expires_at > Utc::now());
        prop_assert!(claims.expires_at <= Utc::now() + Duration::seconds(ttl + 1));
    }

    #[test]
    fn test_access_token_bound_to_secret(id in user_id(), secret in "[a-z]{8,32}") {
        prop_assume!(secret != "proptest-secret");
        let issuer = JwtSigner::new("proptest-secret", Duration::minutes(5));
        let other = JwtSigner::new(&secret, Duration::minutes(5));

        let token = issuer.issue(id).unwrap();
        prop_assert_eq!(other.verify(&token).unwrap_err().code, ErrorCode::Invalid);
    }

    #[test]
    fn test_refresh_tokens_deleted_once(count in 1usize..8) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let store = MemoryRefreshTokenStore::new(Duration::days(1));
            let owner = Uuid::new_v4();

            let mut tokens = Vec::new();
            for _ in 0..count {
                tokens.push(store.create(owner).await.unwrap().token);
            }

            for token in &tokens {
                assert_eq!(store.get(token).await.unwrap().user_id, owner);
                store.delete(token).await.unwrap();
                assert_eq!(store.delete(token).await.unwrap_err().code, ErrorCode::NotFound);
            }
            assert!(store.is_empty().await);
        });
    }
}
