use thiserror::Error;

/// Error type for signing key material operations.
#[derive(Debug, Clone, Error)]
pub enum KeyError {
    #[error("Key generation failed: {0}")]
    GenerationFailed(String),

    #[error("Failed to decode key material: {0}")]
    DecodingFailed(String),

    #[error("Failed to encode key material: {0}")]
    EncodingFailed(String),
}
