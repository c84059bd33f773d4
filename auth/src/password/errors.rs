use thiserror::Error;

use super::policy::PolicyViolations;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Weak password: {0}")]
    WeakPassword(PolicyViolations),
}
