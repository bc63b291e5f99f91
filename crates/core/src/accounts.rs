//! Account credential rules and authentication outcomes.

use crate::error::CoreError;

/// Minimum password length accepted at registration.
///
/// Enforced client-side before the register request is sent; the server
/// only requires a non-empty password.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Normalize a submitted username: surrounding whitespace is stripped, case
/// is preserved.
pub fn normalize_username(username: &str) -> &str {
    username.trim()
}

/// Validate a username/password pair as submitted to register or login.
///
/// Returns the normalized username on success.
pub fn validate_credentials<'a>(username: &'a str, password: &str) -> Result<&'a str, String> {
    let username = normalize_username(username);
    if username.is_empty() || password.is_empty() {
        return Err("Username and password required".to_string());
    }
    Ok(username)
}

/// Validate that a password meets the registration length requirement.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters"
        ));
    }
    Ok(())
}

/// Why an authentication attempt was rejected.
///
/// The two credential failures stay distinct here so callers can log and
/// test them separately, even though both surface to HTTP clients as 401.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("User not found")]
    UnknownUser,

    #[error("Wrong password")]
    WrongPassword,

    /// The stored hash could not be parsed or verified.
    #[error("Password verification error: {0}")]
    Hash(String),
}

impl From<AuthError> for CoreError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnknownUser | AuthError::WrongPassword => {
                CoreError::Unauthorized(err.to_string())
            }
            AuthError::Hash(msg) => CoreError::Internal(msg),
        }
    }
}
