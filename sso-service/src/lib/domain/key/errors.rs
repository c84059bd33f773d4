use auth::KeyError;
use thiserror::Error;

use crate::domain::errors::ErrorKind;

/// Error type for signing key lifecycle operations
#[derive(Debug, Clone, Error)]
pub enum SigningKeyError {
    #[error("Key store unavailable: {0}")]
    KeyStoreUnavailable(String),

    #[error("Signing key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Stored signing key could not be decoded: {0}")]
    KeyDecodeFailed(String),
}

impl SigningKeyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SigningKeyError::KeyStoreUnavailable(_) => ErrorKind::StoreUnavailable,
            SigningKeyError::KeyGenerationFailed(_) | SigningKeyError::KeyDecodeFailed(_) => {
                ErrorKind::Crypto
            }
        }
    }
}

impl From<KeyError> for SigningKeyError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::DecodingFailed(msg) => SigningKeyError::KeyDecodeFailed(msg),
            KeyError::GenerationFailed(msg) | KeyError::EncodingFailed(msg) => {
                SigningKeyError::KeyGenerationFailed(msg)
            }
        }
    }
}
