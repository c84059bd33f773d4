use async_trait::async_trait;
use auth::Claims;

use crate::domain::auth::errors::AuthError;
use crate::domain::credential::models::Login;

/// Port for issuing tokens from login credentials.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Authenticate credentials and mint a signed token.
    ///
    /// # Arguments
    /// * `login` - Login of the user
    /// * `password` - Plain text password
    ///
    /// # Returns
    /// Compact RS256 token whose audience is the login
    ///
    /// # Errors
    /// * `UserNotFound` - Login is unknown
    /// * `InvalidCredentials` - Password does not match
    /// * `CredentialStoreUnavailable` - Credential store did not answer
    /// * `AuthenticationFailed` - Key, signing or stored hash failure
    async fn authenticate(&self, login: &Login, password: &str) -> Result<String, AuthError>;
}

/// Port for verifying tokens and exporting the verification key.
#[async_trait]
pub trait TokenValidationServicePort: Send + Sync + 'static {
    /// Verify a token against the current key and its time bounds.
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Token` - Malformed, forged, expired or not yet valid token
    /// * `SigningKey` - Current key unavailable
    async fn validate(&self, token: &str) -> Result<Claims, AuthError>;

    /// PKCS#1 DER encoding of the current public key.
    ///
    /// # Errors
    /// * `SigningKey` - Current key unavailable
    async fn public_key_material(&self) -> Result<Vec<u8>, AuthError>;
}
