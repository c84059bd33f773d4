use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::CredentialId;
use crate::domain::credential::models::Login;
use crate::domain::credential::ports::CredentialStore;

const LOGIN_UNIQUE_CONSTRAINT: &str = "credentials_login_key";

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    login: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = CredentialError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(Credential {
            id: CredentialId(row.id),
            login: Login::new(row.login)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

pub struct PostgresCredentialStore {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresCredentialStore {
    /// # Arguments
    /// * `pool` - Connection pool
    /// * `timeout` - Upper bound for each round trip
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    fn timed_out(&self) -> CredentialError {
        CredentialError::StoreUnavailable(format!(
            "query timed out after {}ms",
            self.timeout.as_millis()
        ))
    }

    /// Run `query` within the store timeout, mapping database errors with `on_error`.
    async fn bounded<T, F, E>(&self, query: F, on_error: E) -> Result<T, CredentialError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
        E: FnOnce(sqlx::Error) -> CredentialError,
    {
        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| self.timed_out())?
            .map_err(on_error)
    }
}

fn map_sqlx_error(err: sqlx::Error) -> CredentialError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            CredentialError::StoreUnavailable(err.to_string())
        }
        other => CredentialError::DatabaseError(other.to_string()),
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_login(&self, login: &Login) -> Result<Option<Credential>, CredentialError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, CredentialRow>(
                    r#"
                    SELECT id, login, password_hash, created_at
                    FROM credentials
                    WHERE login = $1
                    "#,
                )
                .bind(login.as_str())
                .fetch_optional(&self.pool),
                map_sqlx_error,
            )
            .await?;

        row.map(Credential::try_from).transpose()
    }

    async fn insert(&self, credential: Credential) -> Result<CredentialId, CredentialError> {
        let login = credential.login.as_str();
        self.bounded(
            sqlx::query(
                r#"
                INSERT INTO credentials (id, login, password_hash, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(credential.id.0)
            .bind(login)
            .bind(&credential.password_hash)
            .bind(credential.created_at)
            .execute(&self.pool),
            |e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation()
                        && db_err.constraint() == Some(LOGIN_UNIQUE_CONSTRAINT)
                    {
                        return CredentialError::LoginAlreadyExists(login.to_string());
                    }
                }
                map_sqlx_error(e)
            },
        )
        .await?;

        Ok(credential.id)
    }
}
