use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::CredentialId;
use crate::domain::credential::models::Login;
use crate::domain::credential::ports::CredentialStore;
use crate::domain::key::errors::SigningKeyError;
use crate::domain::key::models::StoredSigningKey;
use crate::domain::key::ports::KeyStore;

/// Process-local credential store, keyed by login.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_login(&self, login: &Login) -> Result<Option<Credential>, CredentialError> {
        Ok(self.credentials.read().await.get(login.as_str()).cloned())
    }

    async fn insert(&self, credential: Credential) -> Result<CredentialId, CredentialError> {
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(credential.login.as_str()) {
            return Err(CredentialError::LoginAlreadyExists(
                credential.login.as_str().to_string(),
            ));
        }

        let id = credential.id;
        credentials.insert(credential.login.as_str().to_string(), credential);
        Ok(id)
    }
}

/// Process-local append-only key store.
#[derive(Default)]
pub struct InMemoryKeyStore {
    keys: RwLock<Vec<StoredSigningKey>>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys inserted so far.
    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }
}

#[async_trait]
impl KeyStore for InMemoryKeyStore {
    async fn load_latest(&self) -> Result<Option<StoredSigningKey>, SigningKeyError> {
        Ok(self.keys.read().await.last().cloned())
    }

    async fn save(&self, key: &StoredSigningKey) -> Result<(), SigningKeyError> {
        self.keys.write().await.push(key.clone());
        Ok(())
    }
}
