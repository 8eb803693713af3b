/**
 * Password Hashing
 *
 * Thin wrapper over bcrypt with a configurable cost. Hashes are salted and
 * irreversible; verification is constant-time inside bcrypt.
 */

use crate::backend::error::{AccountError, AccountResult};

/// Lowest work factor bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest work factor bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    pub fn hash(&self, password: &str) -> AccountResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AccountError::internal("PasswordHasher.hash", e))
    }

    /// Check a plaintext password against a stored hash
    ///
    /// # Errors
    ///
    /// * `CONFLICT` - the password does not match
    /// * `INTERNAL` - the stored hash is malformed
    pub fn verify(&self, password: &str, password_hash: &str) -> AccountResult<()> {
        let op = "PasswordHasher.verify";

        let valid = bcrypt::verify(password, password_hash)
            .map_err(|e| AccountError::internal(op, e))?;

        if !valid {
            return Err(AccountError::conflict(op, "password does not match"));
        }
        Ok(())
    }
}
