use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::key::errors::SigningKeyError;
use crate::domain::key::models::StoredSigningKey;
use crate::domain::key::ports::KeyStore;

#[derive(sqlx::FromRow)]
struct SigningKeyRow {
    id: Uuid,
    private_key_der: Vec<u8>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SigningKeyRow> for StoredSigningKey {
    fn from(row: SigningKeyRow) -> Self {
        StoredSigningKey {
            id: row.id,
            private_key_der: row.private_key_der,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// Append-only signing key table; the latest key is the highest `seq`.
pub struct PostgresKeyStore {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresKeyStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    fn timed_out(&self) -> SigningKeyError {
        SigningKeyError::KeyStoreUnavailable(format!(
            "query timed out after {}ms",
            self.timeout.as_millis()
        ))
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, SigningKeyError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| SigningKeyError::KeyStoreUnavailable(e.to_string()))
    }
}

#[async_trait]
impl KeyStore for PostgresKeyStore {
    async fn load_latest(&self) -> Result<Option<StoredSigningKey>, SigningKeyError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, SigningKeyRow>(
                    r#"
                    SELECT id, private_key_der, created_at, expires_at
                    FROM signing_keys
                    ORDER BY seq DESC
                    LIMIT 1
                    "#,
                )
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(StoredSigningKey::from))
    }

    async fn save(&self, key: &StoredSigningKey) -> Result<(), SigningKeyError> {
        self.bounded(
            sqlx::query(
                r#"
                INSERT INTO signing_keys (id, private_key_der, created_at, expires_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(key.id)
            .bind(&key.private_key_der)
            .bind(key.created_at)
            .bind(key.expires_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }
}
