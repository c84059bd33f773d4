use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::credential::errors::CredentialError;
use crate::domain::errors::ErrorKind;
use crate::domain::key::errors::SigningKeyError;

/// Underlying cause of an [`AuthError::AuthenticationFailed`].
#[derive(Debug, Clone, Error)]
pub enum AuthenticationFailure {
    #[error(transparent)]
    SigningKey(#[from] SigningKeyError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Error type for authentication and token validation
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential store unavailable: {0}")]
    CredentialStoreUnavailable(String),

    #[error("Authentication failed during {operation}")]
    AuthenticationFailed {
        operation: &'static str,
        #[source]
        cause: AuthenticationFailure,
    },

    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),

    #[error("Signing key unavailable: {0}")]
    SigningKey(#[from] SigningKeyError),
}

impl AuthError {
    pub(crate) fn failed(operation: &'static str, cause: impl Into<AuthenticationFailure>) -> Self {
        AuthError::AuthenticationFailed {
            operation,
            cause: cause.into(),
        }
    }

    /// External category of this error.
    ///
    /// Unknown logins, wrong passwords and downstream authentication
    /// failures all report [`ErrorKind::Credential`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound(_) | AuthError::InvalidCredentials => ErrorKind::Credential,
            AuthError::CredentialStoreUnavailable(_) => ErrorKind::StoreUnavailable,
            AuthError::AuthenticationFailed {
                cause: AuthenticationFailure::SigningKey(SigningKeyError::KeyStoreUnavailable(_)),
                ..
            } => ErrorKind::StoreUnavailable,
            AuthError::AuthenticationFailed { .. } => ErrorKind::Credential,
            AuthError::Token(_) => ErrorKind::Token,
            AuthError::SigningKey(e) => e.kind(),
        }
    }
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::StoreUnavailable(msg) | CredentialError::DatabaseError(msg) => {
                AuthError::CredentialStoreUnavailable(msg)
            }
            other => AuthError::failed("credential lookup", other),
        }
    }
}
