use auth::PasswordError;
use thiserror::Error;

use crate::domain::errors::ErrorKind;

/// Error for Login validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login must not be empty")]
    Empty,

    #[error("Login too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Login must not contain whitespace or control characters")]
    InvalidCharacters,
}

/// Top-level error for credential operations
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Invalid login: {0}")]
    InvalidLogin(#[from] LoginError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Login already exists: {0}")]
    LoginAlreadyExists(String),

    // Infrastructure errors
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl CredentialError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CredentialError::InvalidLogin(_)
            | CredentialError::LoginAlreadyExists(_)
            | CredentialError::Password(PasswordError::WeakPassword(_)) => ErrorKind::Validation,
            CredentialError::Password(_) => ErrorKind::Crypto,
            CredentialError::StoreUnavailable(_) | CredentialError::DatabaseError(_) => {
                ErrorKind::StoreUnavailable
            }
        }
    }
}
