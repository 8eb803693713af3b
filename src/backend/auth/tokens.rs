/**
 * JWT Access Tokens
 *
 * Stateless access tokens for the JWT strategy. A fixed symmetric key signs
 * `{ sub, iat, exp }` with HS256; verification is a signature plus expiry
 * check with no store lookup, so an access token cannot be revoked before it
 * expires.
 */

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::domain::AccessClaims;
use crate::backend::error::{AccountError, AccountResult};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signs and verifies access tokens with one shared secret
#[derive(Clone)]
pub struct JwtSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtSigner {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a signed access token for a user
    pub fn issue(&self, user_id: Uuid) -> AccountResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AccountError::internal("JwtSigner.issue", e))
    }

    /// Verify and decode an access token
    ///
    /// # Errors
    ///
    /// * `EXPIRED` - the signature is valid but `exp` has passed
    /// * `INVALID` - anything else wrong with the token
    pub fn verify(&self, token: &str) -> AccountResult<AccessClaims> {
        let op = "JwtSigner.verify";

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AccountError::expired(op, "access token expired").with_source(e)
                }
                _ => AccountError::invalid(op, "invalid access token").with_source(e),
            }
        })?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|e| AccountError::invalid(op, "invalid access token").with_source(e))?;

        let expires_at: DateTime<Utc> = Utc
            .timestamp_opt(data.claims.exp, 0)
            .single()
            .ok_or_else(|| AccountError::invalid(op, "invalid access token"))?;

        Ok(AccessClaims {
            user_id,
            expires_at,
            session_id: None,
        })
    }
}
