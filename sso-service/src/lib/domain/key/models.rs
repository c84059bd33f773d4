use std::fmt;

use auth::KeyPair;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::key::errors::SigningKeyError;

/// Signing key unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SigningKeyId(pub Uuid);

impl SigningKeyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SigningKeyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SigningKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Decoded signing key with its validity window.
///
/// A key is usable for minting strictly before `expires_at`.
#[derive(Debug, Clone)]
pub struct SigningKey {
    pub id: SigningKeyId,
    pub key_pair: KeyPair,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SigningKey {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Rebuild a signing key from its persisted form.
    ///
    /// # Errors
    /// * `KeyDecodeFailed` - Stored bytes are not a usable RSA private key
    pub fn from_stored(stored: StoredSigningKey) -> Result<Self, SigningKeyError> {
        let key_pair = KeyPair::from_pkcs1_der(&stored.private_key_der)
            .map_err(|e| SigningKeyError::KeyDecodeFailed(e.to_string()))?;

        Ok(Self {
            id: SigningKeyId(stored.id),
            key_pair,
            created_at: stored.created_at,
            expires_at: stored.expires_at,
        })
    }

    /// Serialize the key for the key store.
    pub fn to_stored(&self) -> Result<StoredSigningKey, SigningKeyError> {
        Ok(StoredSigningKey {
            id: self.id.0,
            private_key_der: self.key_pair.to_pkcs1_der()?,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}

/// Signing key record as kept by a [`KeyStore`](crate::domain::key::ports::KeyStore).
///
/// The private key is PKCS#1 DER.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredSigningKey {
    pub id: Uuid,
    pub private_key_der: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl StoredSigningKey {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl fmt::Debug for StoredSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSigningKey")
            .field("id", &self.id)
            .field("private_key_der", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
