use async_trait::async_trait;

use crate::domain::key::errors::SigningKeyError;
use crate::domain::key::models::SigningKey;
use crate::domain::key::models::StoredSigningKey;

/// Persistence operations for signing keys.
///
/// Keys are append-only; "latest" means most recently inserted.
#[async_trait]
pub trait KeyStore: Send + Sync + 'static {
    /// Retrieve the most recently inserted key, expired or not.
    ///
    /// # Errors
    /// * `KeyStoreUnavailable` - Store unreachable or timed out
    async fn load_latest(&self) -> Result<Option<StoredSigningKey>, SigningKeyError>;

    /// Append a key.
    ///
    /// # Errors
    /// * `KeyStoreUnavailable` - Store unreachable or timed out
    async fn save(&self, key: &StoredSigningKey) -> Result<(), SigningKeyError>;
}

/// Source of the key currently used to sign and verify tokens.
#[async_trait]
pub trait SigningKeySource: Send + Sync + 'static {
    /// Return the current non-expired key, rotating when none is usable.
    ///
    /// # Errors
    /// * `KeyStoreUnavailable` - Key store unreachable
    /// * `KeyGenerationFailed` - A replacement key could not be generated
    /// * `KeyDecodeFailed` - The latest stored key is corrupt
    async fn current_key(&self) -> Result<SigningKey, SigningKeyError>;

    /// PKCS#1 DER encoding of the current public key.
    ///
    /// # Errors
    /// Same as [`SigningKeySource::current_key`]
    async fn public_key_material(&self) -> Result<Vec<u8>, SigningKeyError>;
}
