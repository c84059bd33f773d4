use async_trait::async_trait;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::CredentialId;
use crate::domain::credential::models::Login;
use crate::domain::credential::models::RegisterCredentialCommand;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new credential after checking the password policy.
    ///
    /// # Arguments
    /// * `command` - Validated login and plain text password
    ///
    /// # Returns
    /// Stored credential with its password hash
    ///
    /// # Errors
    /// * `Password(WeakPassword)` - Password violates the composition policy
    /// * `LoginAlreadyExists` - Login is already taken
    /// * `StoreUnavailable` - Credential store did not answer in time
    async fn register(&self, command: RegisterCredentialCommand)
        -> Result<Credential, CredentialError>;

    /// Register the credential only when its login is not stored yet.
    ///
    /// # Returns
    /// `Some(credential)` when a credential was created, `None` when the login already existed
    ///
    /// # Errors
    /// Same as [`CredentialServicePort::register`]
    async fn ensure_credential(
        &self,
        command: RegisterCredentialCommand,
    ) -> Result<Option<Credential>, CredentialError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve credential by login.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store unreachable or timed out
    /// * `DatabaseError` - Query failed
    async fn find_by_login(&self, login: &Login) -> Result<Option<Credential>, CredentialError>;

    /// Persist a new credential.
    ///
    /// # Errors
    /// * `LoginAlreadyExists` - Login is already taken
    /// * `StoreUnavailable` - Store unreachable or timed out
    /// * `DatabaseError` - Query failed
    async fn insert(&self, credential: Credential) -> Result<CredentialId, CredentialError>;
}
