//! Shared test doubles for the domain services.

use std::sync::OnceLock;

use async_trait::async_trait;
use auth::KeyPair;
use auth::PasswordHasher;
use chrono::Duration;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::CredentialId;
use crate::domain::credential::models::Login;
use crate::domain::credential::ports::CredentialStore;
use crate::domain::key::errors::SigningKeyError;
use crate::domain::key::models::SigningKey;
use crate::domain::key::models::SigningKeyId;
use crate::domain::key::ports::SigningKeySource;

mock! {
    pub TestCredentialStore {}

    #[async_trait]
    impl CredentialStore for TestCredentialStore {
        async fn find_by_login(&self, login: &Login) -> Result<Option<Credential>, CredentialError>;
        async fn insert(&self, credential: Credential) -> Result<CredentialId, CredentialError>;
    }
}

mock! {
    pub TestKeySource {}

    #[async_trait]
    impl SigningKeySource for TestKeySource {
        async fn current_key(&self) -> Result<SigningKey, SigningKeyError>;
        async fn public_key_material(&self) -> Result<Vec<u8>, SigningKeyError>;
    }
}

/// Key pair shared by all tests; generation is slow.
pub(crate) fn key_pair() -> &'static KeyPair {
    static KEY: OnceLock<KeyPair> = OnceLock::new();
    KEY.get_or_init(|| KeyPair::generate().expect("test key generation"))
}

/// A second, unrelated key pair.
pub(crate) fn other_key_pair() -> &'static KeyPair {
    static KEY: OnceLock<KeyPair> = OnceLock::new();
    KEY.get_or_init(|| KeyPair::generate().expect("test key generation"))
}

pub(crate) fn signing_key() -> SigningKey {
    let created_at = Utc::now();
    SigningKey {
        id: SigningKeyId(Uuid::from_u128(1)),
        key_pair: key_pair().clone(),
        created_at,
        expires_at: created_at + Duration::hours(2),
    }
}

/// Key source that always returns [`signing_key`].
pub(crate) fn fixed_key_source() -> MockTestKeySource {
    let mut keys = MockTestKeySource::new();
    keys.expect_current_key().returning(|| Ok(signing_key()));
    keys.expect_public_key_material()
        .returning(|| Ok(key_pair().public_key().to_pkcs1_der().to_vec()));
    keys
}

pub(crate) fn credential(login: &str, password: &str) -> Credential {
    Credential {
        id: CredentialId::new(),
        login: Login::new(login.to_string()).unwrap(),
        password_hash: PasswordHasher::new().hash(password).unwrap(),
        created_at: Utc::now(),
    }
}
