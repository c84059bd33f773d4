use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::TokenPolicy;
use crate::domain::auth::ports::AuthenticationServicePort;
use crate::domain::credential::models::Login;
use crate::domain::credential::ports::CredentialStore;
use crate::domain::key::ports::SigningKeySource;

/// Issues signed tokens for valid login/password pairs.
pub struct AuthenticationService<CS, K>
where
    CS: CredentialStore,
    K: SigningKeySource,
{
    credentials: Arc<CS>,
    keys: Arc<K>,
    policy: TokenPolicy,
    password_hasher: PasswordHasher,
    codec: TokenCodec,
}

impl<CS, K> AuthenticationService<CS, K>
where
    CS: CredentialStore,
    K: SigningKeySource,
{
    /// # Arguments
    /// * `credentials` - Credential lookup implementation
    /// * `keys` - Source of the current signing key
    /// * `policy` - Issuer, subject and lifetime of issued tokens
    pub fn new(credentials: Arc<CS>, keys: Arc<K>, policy: TokenPolicy) -> Self {
        Self {
            credentials,
            keys,
            policy,
            password_hasher: PasswordHasher::new(),
            codec: TokenCodec::new(),
        }
    }
}

#[async_trait]
impl<CS, K> AuthenticationServicePort for AuthenticationService<CS, K>
where
    CS: CredentialStore,
    K: SigningKeySource,
{
    async fn authenticate(&self, login: &Login, password: &str) -> Result<String, AuthError> {
        let credential = match self.credentials.find_by_login(login).await? {
            Some(credential) => credential,
            None => {
                // Same work as a wrong password
                let _ = self.password_hasher.verify_dummy(password);
                tracing::warn!(login = %login, "Authentication rejected: unknown login");
                return Err(AuthError::UserNotFound(login.to_string()));
            }
        };

        match self
            .password_hasher
            .verify(password, &credential.password_hash)
        {
            Ok(()) => {}
            Err(PasswordError::InvalidCredentials) => {
                tracing::warn!(login = %login, "Authentication rejected: wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::failed("password verification", e)),
        }

        let key = self
            .keys
            .current_key()
            .await
            .map_err(|e| AuthError::failed("signing key", e))?;

        let claims = Claims::issued(
            &self.policy.issuer,
            &self.policy.subject,
            credential.id,
            Utc::now(),
            self.policy.lifetime,
        )
        .with_token_id(Uuid::new_v4());

        let token = self
            .codec
            .encode(&key.key_pair, &claims)
            .map_err(|e| AuthError::failed("token signing", e))?;

        tracing::info!(
            login = %login,
            credential_id = %credential.id,
            key_id = %key.id,
            "Token issued"
        );
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::errors::AuthenticationFailure;
    use crate::domain::credential::errors::CredentialError;
    use crate::domain::credential::models::Credential;
    use crate::domain::errors::ErrorKind;
    use crate::domain::key::errors::SigningKeyError;
    use crate::domain::testing::credential;
    use crate::domain::testing::fixed_key_source;
    use crate::domain::testing::key_pair;
    use crate::domain::testing::MockTestCredentialStore;
    use crate::domain::testing::MockTestKeySource;

    fn login(value: &str) -> Login {
        Login::new(value.to_string()).unwrap()
    }

    fn store_with(login: &'static str, password: &'static str) -> MockTestCredentialStore {
        store_holding(credential(login, password))
    }

    fn store_holding(stored: Credential) -> MockTestCredentialStore {
        let login = stored.login.clone();
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_login().returning(move |requested| {
            if *requested == login {
                Ok(Some(stored.clone()))
            } else {
                Ok(None)
            }
        });
        store
    }

    #[tokio::test]
    async fn test_authenticate_issues_token() {
        let stored = credential("alice", "Str0ng!pw");
        let id = stored.id;
        let service = AuthenticationService::new(
            Arc::new(store_holding(stored)),
            Arc::new(fixed_key_source()),
            TokenPolicy::default(),
        );

        let token = service
            .authenticate(&login("alice"), "Str0ng!pw")
            .await
            .unwrap();

        let claims = TokenCodec::new()
            .decode(key_pair().public_key(), &token)
            .unwrap();
        assert_eq!(claims.iss.as_deref(), Some("sso"));
        assert_eq!(claims.sub.as_deref(), Some("auth"));
        assert_eq!(claims.aud, Some(id.to_string()));
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 2 * 60 * 60);
        assert!(claims.jti.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut keys = MockTestKeySource::new();
        keys.expect_current_key().times(0);

        let service = AuthenticationService::new(
            Arc::new(store_with("alice", "Str0ng!pw")),
            Arc::new(keys),
            TokenPolicy::default(),
        );

        let result = service.authenticate(&login("alice"), "Wr0ng!pw").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_login_looks_like_wrong_password() {
        let service = AuthenticationService::new(
            Arc::new(store_with("alice", "Str0ng!pw")),
            Arc::new(fixed_key_source()),
            TokenPolicy::default(),
        );

        let unknown = service
            .authenticate(&login("mallory"), "Str0ng!pw")
            .await
            .unwrap_err();
        let wrong = service
            .authenticate(&login("alice"), "Wr0ng!pw")
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::UserNotFound(_)));
        assert_eq!(unknown.kind(), ErrorKind::Credential);
        assert_eq!(unknown.kind(), wrong.kind());
    }

    #[tokio::test]
    async fn test_authenticate_store_unavailable() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_login()
            .returning(|_| Err(CredentialError::StoreUnavailable("timeout".to_string())));

        let service = AuthenticationService::new(
            Arc::new(store),
            Arc::new(fixed_key_source()),
            TokenPolicy::default(),
        );

        let result = service.authenticate(&login("alice"), "Str0ng!pw").await;
        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::CredentialStoreUnavailable(_)));
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_authenticate_key_failure() {
        let mut keys = MockTestKeySource::new();
        keys.expect_current_key()
            .returning(|| Err(SigningKeyError::KeyGenerationFailed("entropy".to_string())));

        let service = AuthenticationService::new(
            Arc::new(store_with("alice", "Str0ng!pw")),
            Arc::new(keys),
            TokenPolicy::default(),
        );

        let err = service
            .authenticate(&login("alice"), "Str0ng!pw")
            .await
            .unwrap_err();
        match &err {
            AuthError::AuthenticationFailed { operation, cause } => {
                assert_eq!(*operation, "signing key");
                assert!(matches!(cause, AuthenticationFailure::SigningKey(_)));
            }
            other => panic!("expected authentication failure, got {:?}", other),
        }
        assert_eq!(err.kind(), ErrorKind::Credential);
    }

    #[tokio::test]
    async fn test_authenticate_malformed_stored_hash() {
        let mut stored = credential("alice", "Str0ng!pw");
        stored.password_hash = "not-a-phc-string".to_string();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_login()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthenticationService::new(
            Arc::new(store),
            Arc::new(fixed_key_source()),
            TokenPolicy::default(),
        );

        let err = service
            .authenticate(&login("alice"), "Str0ng!pw")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::AuthenticationFailed {
                operation: "password verification",
                cause: AuthenticationFailure::Password(_),
            }
        ));
    }
}
