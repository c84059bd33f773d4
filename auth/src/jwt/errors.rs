use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature does not match")]
    SignatureMismatch,

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not valid yet")]
    TokenNotYetValid,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
