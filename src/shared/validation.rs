//! Account Input Validation
//!
//! Hand-rolled checks for sign-up, login and profile payloads. Each check
//! returns the first problem found as a [`SharedError`].

use crate::shared::error::SharedError;

/// Minimum password length in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// bcrypt only looks at the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Display names must be between 2 and 20 characters
pub const DISPLAY_NAME_LEN: std::ops::RangeInclusive<usize> = 2..=20;

/// Require a non-blank value
pub fn require(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::missing(field));
    }
    Ok(())
}

/// Validate email format
///
/// Accepts `local@domain.tld`: exactly one `@`, no whitespace, and a domain
/// with at least one inner dot.
pub fn validate_email(email: &str) -> Result<(), SharedError> {
    require("email", email)?;

    let invalid = || SharedError::validation("email", "must be a valid email address");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let dot = domain.rfind('.').ok_or_else(invalid)?;
    if dot == 0 || dot == domain.len() - 1 || domain.starts_with('.') {
        return Err(invalid());
    }

    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), SharedError> {
    require("password", password)?;

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(SharedError::validation(
            "password",
            format!("must be at most {} bytes", MAX_PASSWORD_BYTES),
        ));
    }

    Ok(())
}

/// Validate a profile display name
pub fn validate_display_name(display_name: &str) -> Result<(), SharedError> {
    require("display_name", display_name)?;

    let len = display_name.trim().chars().count();
    if !DISPLAY_NAME_LEN.contains(&len) {
        return Err(SharedError::validation(
            "display_name",
            format!(
                "must be between {} and {} characters",
                DISPLAY_NAME_LEN.start(),
                DISPLAY_NAME_LEN.end()
            ),
        ));
    }

    Ok(())
}
