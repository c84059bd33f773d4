use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sso_service::config::Config;
use sso_service::config::StorageBackend;
use sso_service::domain::credential::models::Login;
use sso_service::domain::credential::models::RegisterCredentialCommand;
use sso_service::domain::credential::ports::CredentialServicePort;
use sso_service::domain::credential::ports::CredentialStore;
use sso_service::domain::key::ports::KeyStore;
use sso_service::inbound::http::router::create_router;
use sso_service::outbound::repositories::InMemoryCredentialStore;
use sso_service::outbound::repositories::InMemoryKeyStore;
use sso_service::outbound::repositories::PostgresCredentialStore;
use sso_service::outbound::repositories::PostgresKeyStore;
use sso_service::AuthenticationService;
use sso_service::CredentialService;
use sso_service::SigningKeyManager;
use sso_service::TokenValidationService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const GENERATED_ROOT_PASSWORD_LENGTH: usize = 16;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sso_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        store_timeout_ms = config.store.timeout_ms,
        key_lifetime_hours = config.keys.lifetime_hours,
        token_lifetime_hours = config.tokens.lifetime_hours,
        "Configuration loaded"
    );

    match config.database.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let credentials = Arc::new(PostgresCredentialStore::new(
                pg_pool.clone(),
                config.store_timeout(),
            ));
            let keys = Arc::new(PostgresKeyStore::new(pg_pool, config.store_timeout()));
            serve(config, credentials, keys).await
        }
        StorageBackend::Memory => {
            tracing::warn!("In-memory storage selected; credentials and keys are lost on exit");
            serve(
                config,
                Arc::new(InMemoryCredentialStore::new()),
                Arc::new(InMemoryKeyStore::new()),
            )
            .await
        }
    }
}

async fn serve<CS, KS>(
    config: Config,
    credentials: Arc<CS>,
    key_store: Arc<KS>,
) -> Result<(), anyhow::Error>
where
    CS: CredentialStore,
    KS: KeyStore,
{
    bootstrap_root(&config, Arc::clone(&credentials)).await?;

    let keys = Arc::new(SigningKeyManager::new(key_store, config.key_lifetime()));
    let authentication = Arc::new(AuthenticationService::new(
        credentials,
        Arc::clone(&keys),
        config.token_policy(),
    ));
    let validation = Arc::new(TokenValidationService::new(keys));

    let http_application = create_router(authentication, validation, config.request_timeout());

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Make sure the root credential exists.
///
/// Without a configured password a random one is generated and logged once.
async fn bootstrap_root<CS>(config: &Config, credentials: Arc<CS>) -> Result<(), anyhow::Error>
where
    CS: CredentialStore,
{
    let login = Login::new(config.bootstrap.root_login.clone())?;
    let (password, generated) = match &config.bootstrap.root_password {
        Some(password) => (password.clone(), false),
        None => (auth::generate_password(GENERATED_ROOT_PASSWORD_LENGTH), true),
    };

    let service = CredentialService::new(credentials);
    let created = service
        .ensure_credential(RegisterCredentialCommand::new(login, password.clone()))
        .await?;

    match created {
        Some(credential) if generated => tracing::warn!(
            login = %credential.login,
            password = %password,
            "Root credential created with a generated password; store it now, it is not shown again"
        ),
        Some(credential) => {
            tracing::info!(login = %credential.login, "Root credential created")
        }
        None => tracing::info!(login = %config.bootstrap.root_login, "Root credential present"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
