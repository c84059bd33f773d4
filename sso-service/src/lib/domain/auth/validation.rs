use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::TokenCodec;
use auth::TokenError;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::TokenValidationServicePort;
use crate::domain::key::ports::SigningKeySource;

/// Verifies tokens against the current signing key.
///
/// Only the current key is consulted, so tokens signed by a rotated-out key
/// are rejected with a signature mismatch even when not yet expired.
pub struct TokenValidationService<K>
where
    K: SigningKeySource,
{
    keys: Arc<K>,
    codec: TokenCodec,
}

impl<K> TokenValidationService<K>
where
    K: SigningKeySource,
{
    pub fn new(keys: Arc<K>) -> Self {
        Self {
            keys,
            codec: TokenCodec::new(),
        }
    }
}

#[async_trait]
impl<K> TokenValidationServicePort for TokenValidationService<K>
where
    K: SigningKeySource,
{
    async fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let key = self.keys.current_key().await?;
        let claims = self.codec.decode(key.key_pair.public_key(), token)?;

        let now = Utc::now().timestamp();
        if claims.exp.is_none() {
            return Err(TokenError::MissingClaim("exp".to_string()).into());
        }
        if claims.is_not_yet_valid(now) {
            return Err(TokenError::TokenNotYetValid.into());
        }
        if claims.is_expired(now) {
            return Err(TokenError::TokenExpired.into());
        }

        Ok(claims)
    }

    async fn public_key_material(&self) -> Result<Vec<u8>, AuthError> {
        Ok(self.keys.public_key_material().await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::errors::ErrorKind;
    use crate::domain::key::errors::SigningKeyError;
    use crate::domain::testing::fixed_key_source;
    use crate::domain::testing::key_pair;
    use crate::domain::testing::other_key_pair;
    use crate::domain::testing::MockTestKeySource;

    fn service() -> TokenValidationService<MockTestKeySource> {
        TokenValidationService::new(Arc::new(fixed_key_source()))
    }

    fn sign(claims: &Claims) -> String {
        TokenCodec::new().encode(key_pair(), claims).unwrap()
    }

    fn token_error(result: Result<Claims, AuthError>) -> TokenError {
        match result {
            Err(AuthError::Token(e)) => e,
            other => panic!("expected token error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_validate_fresh_token() {
        let claims = Claims::issued("sso", "auth", "alice", Utc::now(), Duration::hours(2));
        let token = sign(&claims);

        let validated = service().validate(&token).await.unwrap();
        assert_eq!(validated, claims);
    }

    #[tokio::test]
    async fn test_validate_expired_token() {
        let issued_at = Utc::now() - Duration::hours(3);
        let claims = Claims::issued("sso", "auth", "alice", issued_at, Duration::hours(2));

        let err = token_error(service().validate(&sign(&claims)).await);
        assert_eq!(err, TokenError::TokenExpired);
    }

    #[tokio::test]
    async fn test_validate_token_expiring_now() {
        let now = Utc::now();
        let claims = Claims::new()
            .with_audience("alice")
            .with_expiration(now.timestamp());

        let err = token_error(service().validate(&sign(&claims)).await);
        assert_eq!(err, TokenError::TokenExpired);
    }

    #[tokio::test]
    async fn test_validate_not_yet_valid_token() {
        let issued_at = Utc::now() + Duration::minutes(10);
        let claims = Claims::issued("sso", "auth", "alice", issued_at, Duration::hours(2));

        let err = token_error(service().validate(&sign(&claims)).await);
        assert_eq!(err, TokenError::TokenNotYetValid);
    }

    #[tokio::test]
    async fn test_validate_missing_expiration() {
        let claims = Claims::new().with_audience("alice");

        let err = token_error(service().validate(&sign(&claims)).await);
        assert_eq!(err, TokenError::MissingClaim("exp".to_string()));
    }

    #[tokio::test]
    async fn test_validate_flipped_signature_character() {
        let claims = Claims::issued("sso", "auth", "alice", Utc::now(), Duration::hours(2));
        let token = sign(&claims);

        let signature_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[signature_start] = if bytes[signature_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let err = token_error(service().validate(&tampered).await);
        assert_eq!(err, TokenError::SignatureMismatch);
    }

    #[tokio::test]
    async fn test_validate_token_from_other_key() {
        let claims = Claims::issued("sso", "auth", "alice", Utc::now(), Duration::hours(2));
        let token = TokenCodec::new().encode(other_key_pair(), &claims).unwrap();

        let err = token_error(service().validate(&token).await);
        assert_eq!(err, TokenError::SignatureMismatch);
    }

    #[tokio::test]
    async fn test_validate_garbage() {
        let result = service().validate("not-a-token").await;
        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::Token(TokenError::MalformedToken(_))));
        assert_eq!(err.kind(), ErrorKind::Token);
    }

    #[tokio::test]
    async fn test_validate_key_store_unavailable() {
        let mut keys = MockTestKeySource::new();
        keys.expect_current_key()
            .returning(|| Err(SigningKeyError::KeyStoreUnavailable("timeout".to_string())));

        let service = TokenValidationService::new(Arc::new(keys));

        let err = service.validate("a.b.c").await.unwrap_err();
        assert!(matches!(err, AuthError::SigningKey(_)));
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_public_key_material() {
        let material = service().public_key_material().await.unwrap();
        assert_eq!(material, key_pair().public_key().to_pkcs1_der());
    }
}
