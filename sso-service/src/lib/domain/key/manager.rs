use std::sync::Arc;

use async_trait::async_trait;
use auth::KeyPair;
use chrono::Duration;
use chrono::Utc;

use crate::domain::key::errors::SigningKeyError;
use crate::domain::key::models::SigningKey;
use crate::domain::key::models::SigningKeyId;
use crate::domain::key::ports::KeyStore;
use crate::domain::key::ports::SigningKeySource;

/// Lazily rotating signing key manager.
///
/// Every call reads the latest stored key. When there is none, or it has
/// expired, a fresh 2048-bit key is generated and appended to the store.
/// Concurrent callers may both rotate; the later insert simply wins.
pub struct SigningKeyManager<KS>
where
    KS: KeyStore,
{
    store: Arc<KS>,
    key_lifetime: Duration,
}

impl<KS> SigningKeyManager<KS>
where
    KS: KeyStore,
{
    /// Create a key manager.
    ///
    /// # Arguments
    /// * `store` - Signing key persistence implementation
    /// * `key_lifetime` - Validity window of newly generated keys
    pub fn new(store: Arc<KS>, key_lifetime: Duration) -> Self {
        Self {
            store,
            key_lifetime,
        }
    }

    async fn rotate(&self) -> Result<SigningKey, SigningKeyError> {
        let key_pair = tokio::task::spawn_blocking(KeyPair::generate)
            .await
            .map_err(|e| SigningKeyError::KeyGenerationFailed(e.to_string()))??;

        let created_at = Utc::now();
        let key = SigningKey {
            id: SigningKeyId::new(),
            key_pair,
            created_at,
            expires_at: created_at + self.key_lifetime,
        };

        self.store.save(&key.to_stored()?).await?;

        tracing::info!(key_id = %key.id, expires_at = %key.expires_at, "Signing key rotated");
        Ok(key)
    }
}

#[async_trait]
impl<KS> SigningKeySource for SigningKeyManager<KS>
where
    KS: KeyStore,
{
    async fn current_key(&self) -> Result<SigningKey, SigningKeyError> {
        match self.store.load_latest().await? {
            Some(stored) if !stored.is_expired_at(Utc::now()) => SigningKey::from_stored(stored),
            Some(stored) => {
                tracing::info!(key_id = %stored.id, expired_at = %stored.expires_at, "Signing key expired");
                self.rotate().await
            }
            None => {
                tracing::info!("No signing key stored");
                self.rotate().await
            }
        }
    }

    async fn public_key_material(&self) -> Result<Vec<u8>, SigningKeyError> {
        let key = self.current_key().await?;
        Ok(key.key_pair.public_key().to_pkcs1_der().to_vec())
    }
}
