use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::PasswordPolicy;
use chrono::Utc;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::CredentialId;
use crate::domain::credential::models::RegisterCredentialCommand;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::credential::ports::CredentialStore;

/// Domain service implementation for credential registration.
pub struct CredentialService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    password_hasher: PasswordHasher,
}

impl<CS> CredentialService<CS>
where
    CS: CredentialStore,
{
    /// Create a new credential service with injected store.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    pub fn new(store: Arc<CS>) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<CS> CredentialServicePort for CredentialService<CS>
where
    CS: CredentialStore,
{
    async fn register(
        &self,
        command: RegisterCredentialCommand,
    ) -> Result<Credential, CredentialError> {
        PasswordPolicy::check(&command.password)?;

        let password_hash = self.password_hasher.hash(&command.password)?;

        let credential = Credential {
            id: CredentialId::new(),
            login: command.login,
            password_hash,
            created_at: Utc::now(),
        };

        self.store.insert(credential.clone()).await?;

        tracing::info!(login = %credential.login, credential_id = %credential.id, "Credential registered");
        Ok(credential)
    }

    async fn ensure_credential(
        &self,
        command: RegisterCredentialCommand,
    ) -> Result<Option<Credential>, CredentialError> {
        if self.store.find_by_login(&command.login).await?.is_some() {
            tracing::debug!(login = %command.login, "Credential already present");
            return Ok(None);
        }

        match self.register(command).await {
            Ok(credential) => Ok(Some(credential)),
            // Another instance registered the same login in between
            Err(CredentialError::LoginAlreadyExists(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
