use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::credential::errors::LoginError;

/// Stored credential of a user.
///
/// The password hash is a PHC string produced by `auth::PasswordHasher`
/// and is opaque to everything else.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: CredentialId,
    pub login: Login,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Credential unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId(pub Uuid);

impl CredentialId {
    /// Generate a new random credential ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login value type
///
/// Ensures the login is 1-64 characters without whitespace or control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid login.
    ///
    /// # Errors
    /// * `Empty` - Login is empty
    /// * `TooLong` - Login longer than 64 characters
    /// * `InvalidCharacters` - Contains whitespace or control characters
    pub fn new(login: String) -> Result<Self, LoginError> {
        let length = login.chars().count();
        if length == 0 {
            return Err(LoginError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(LoginError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if login.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(LoginError::InvalidCharacters);
        }
        Ok(Self(login))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new credential
#[derive(Debug)]
pub struct RegisterCredentialCommand {
    pub login: Login,
    pub password: String,
}

impl RegisterCredentialCommand {
    /// # Arguments
    /// * `login` - Validated login
    /// * `password` - Plain text password (checked against the policy and hashed by the service)
    pub fn new(login: Login, password: String) -> Self {
        Self { login, password }
    }
}
