/**
 * Auth Service
 *
 * Sign-up, login, logout, request authentication and access-token renewal.
 * One service serves both token strategies; which one is active is decided
 * by the [`TokenStrategy`] it is built with.
 *
 * # Strategies
 *
 * - **Session** - login mints a server-held session whose ID is presented on
 *   every request. Logout deletes it.
 * - **JWT** - login mints a short-lived signed access token plus a server-held
 *   refresh token. Logout deletes the refresh token; access tokens already
 *   handed out stay valid until they expire.
 */

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::auth::domain::{
    AccessClaims, IssuedCredentials, NewUser, TokenRecord, User, UserRecord,
};
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::tokens::JwtSigner;
use crate::backend::error::{AccountError, AccountResult, ErrorCode};
use crate::backend::store::{RefreshTokenStore, SessionStore, UserStore};

/// How a logged-in user proves who they are
#[derive(Clone)]
pub enum TokenStrategy {
    Session(Arc<dyn SessionStore>),
    Jwt {
        access: JwtSigner,
        refresh: Arc<dyn RefreshTokenStore>,
    },
}

impl TokenStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Session(_) => "session",
            Self::Jwt { .. } => "jwt",
        }
    }
}

impl std::fmt::Debug for TokenStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    strategy: TokenStrategy,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("strategy", &self.strategy)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, strategy: TokenStrategy, hasher: PasswordHasher) -> Self {
        Self {
            users,
            strategy,
            hasher,
        }
    }

    pub fn strategy(&self) -> &TokenStrategy {
        &self.strategy
    }

    /// Register a new account
    ///
    /// The password is hashed before it reaches the store. A taken email is
    /// a `CONFLICT` and leaves the store as it was.
    pub async fn sign_up(&self, candidate: NewUser) -> AccountResult<User> {
        let op = "AuthService.sign_up";

        let password_hash = self.hasher.hash(&candidate.password).map_err(|e| e.within(op))?;

        let user = self
            .users
            .insert(UserRecord {
                name: candidate.name,
                email: candidate.email,
                password_hash,
            })
            .await
            .map_err(|e| e.within(op))?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Check credentials and mint the strategy's login artifacts
    ///
    /// # Errors
    ///
    /// * `NOT_FOUND` - no account has this email
    /// * `CONFLICT` - the password does not match
    ///
    /// Both carry the same client message so callers cannot tell them apart.
    pub async fn log_in(&self, email: &str, password: &str) -> AccountResult<(User, IssuedCredentials)> {
        let op = "AuthService.log_in";
        let incorrect = format!("email ({}) or password incorrect", email);

        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(|e| e.within(op).with_message(incorrect.clone()))?;

        self.hasher
            .verify(password, &user.password_hash)
            .map_err(|e| e.within(op).with_message(incorrect))?;

        let credentials = match &self.strategy {
            TokenStrategy::Session(sessions) => {
                let session = sessions.create(user.id).await.map_err(|e| e.within(op))?;
                IssuedCredentials::Session(session)
            }
            TokenStrategy::Jwt { access, refresh } => {
                let access_token = access.issue(user.id).map_err(|e| e.within(op))?;
                let refresh_token = refresh.create(user.id).await.map_err(|e| e.within(op))?;
                IssuedCredentials::Tokens {
                    access_token,
                    refresh_token: refresh_token.token,
                    user_id: user.id,
                }
            }
        };

        tracing::info!(user_id = %user.id, strategy = self.strategy.name(), "User logged in");
        Ok((user, credentials))
    }

    /// Invalidate a session ID or refresh token
    ///
    /// `NOT_FOUND` if it was never issued or is already gone.
    pub async fn log_out(&self, credential: &str) -> AccountResult<()> {
        let op = "AuthService.log_out";

        let revoked = match &self.strategy {
            TokenStrategy::Session(sessions) => sessions.delete(credential).await,
            TokenStrategy::Jwt { refresh, .. } => refresh.delete(credential).await,
        };
        revoked.map_err(|e| e.within(op))?;

        tracing::debug!("Credential revoked");
        Ok(())
    }

    /// Log out on behalf of `owner`, who must hold the credential
    ///
    /// A refresh token issued to another user is reported as `NOT_FOUND`,
    /// the same as one that does not exist.
    pub async fn log_out_as(&self, owner: Uuid, credential: &str) -> AccountResult<()> {
        let op = "AuthService.log_out";

        let holder = match &self.strategy {
            TokenStrategy::Session(sessions) => sessions.get(credential).await.map(|s| s.user_id),
            TokenStrategy::Jwt { refresh, .. } => refresh.get(credential).await.map(|t| t.user_id),
        };
        let holder = holder.map_err(|e| e.within(op))?;

        if holder != owner {
            tracing::warn!(user_id = %owner, "Logout with a credential held by another user");
            return Err(AccountError::not_found(op, "credential does not exist"));
        }

        self.log_out(credential).await
    }

    /// Resolve the identity behind a presented session ID or access token
    ///
    /// # Errors
    ///
    /// * `INVALID` - unknown session, or a token that fails verification
    /// * `EXPIRED` - the session or token is past its expiry
    pub async fn authenticate(&self, presented: &str) -> AccountResult<AccessClaims> {
        let op = "AuthService.authenticate";
        let now = Utc::now();

        let claims = match &self.strategy {
            TokenStrategy::Session(sessions) => {
                let session = sessions.get(presented).await.map_err(|e| match e.code {
                    ErrorCode::NotFound => {
                        AccountError::invalid(op, "invalid session").with_source(e)
                    }
                    _ => e.within(op),
                })?;

                if session.is_expired_at(now) {
                    return Err(AccountError::expired(op, "session expired"));
                }

                AccessClaims {
                    user_id: session.user_id,
                    expires_at: session.expires_at,
                    session_id: Some(session.id),
                }
            }
            TokenStrategy::Jwt { access, .. } => {
                let claims = access.verify(presented).map_err(|e| e.within(op))?;
                if claims.expires_at < now {
                    return Err(AccountError::expired(op, "access token expired"));
                }
                claims
            }
        };

        Ok(claims)
    }

    /// Mint a new access token from a refresh token
    ///
    /// The refresh token is left in place and can be used again until it
    /// expires or is logged out.
    ///
    /// # Errors
    ///
    /// * `INVALID` - session strategy, or an unknown or revoked refresh token
    /// * `EXPIRED` - the refresh token is past its expiry
    pub async fn regenerate_access_token(&self, refresh_token: &str) -> AccountResult<String> {
        let op = "AuthService.regenerate_access_token";

        let TokenStrategy::Jwt { access, refresh } = &self.strategy else {
            return Err(AccountError::invalid(op, "access tokens are not used with sessions"));
        };

        let record = refresh.get(refresh_token).await.map_err(|e| match e.code {
            ErrorCode::NotFound => AccountError::invalid(op, "invalid refresh token").with_source(e),
            _ => e.within(op),
        })?;

        if record.is_expired_at(Utc::now()) {
            return Err(AccountError::expired(op, "refresh token expired"));
        }

        let token = access.issue(record.user_id).map_err(|e| e.within(op))?;
        tracing::debug!(user_id = %record.user_id, "Access token regenerated");
        Ok(token)
    }
}
