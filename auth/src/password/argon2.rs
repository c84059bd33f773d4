use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed Argon2id hash that no password matches. Verifying against it
/// costs the same as a real verification.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation. The composition policy is
    /// not applied here; callers registering new credentials run
    /// [`PasswordPolicy::check`](super::PasswordPolicy::check) first.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Parameters are taken from the stored hash; the digest comparison is
    /// constant time.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `MalformedHash` - Stored hash cannot be parsed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(()),
            Err(PasswordHashError::Password) => Err(PasswordError::InvalidCredentials),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }

    /// Burn one verification against a decoy hash.
    ///
    /// Used when the login is unknown so that the response time does not
    /// reveal whether the account exists. Always fails.
    pub fn verify_dummy(&self, password: &str) -> PasswordError {
        match self.verify(password, DECOY_HASH) {
            Ok(()) | Err(PasswordError::InvalidCredentials) => PasswordError::InvalidCredentials,
            Err(e) => e,
        }
    }
}
