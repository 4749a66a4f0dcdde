use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use parametria_api::config::{ConfigError, ServerConfig};
use parametria_api::router::build_app_router;
use parametria_api::routes::API_PREFIX;
use parametria_api::state::AppState;
use parametria_db::store::{MemoryModuleStore, ModuleStore, PgModuleStore};
use parametria_template::{TemplateClient, TemplateError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Failures that stop the server before it starts serving.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid HOST address {0:?}")]
    Host(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parametria_api=debug,parametria_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Configuration loaded");

    // --- Store ---
    let store = build_store(&config).await?;

    // --- Template API client ---
    let template = TemplateClient::new(config.template_timeout())?;

    // --- Router ---
    let host: IpAddr = config
        .host
        .parse()
        .map_err(|_| StartupError::Host(config.host.clone()))?;
    let addr = SocketAddr::new(host, config.port);
    let app = build_app_router(AppState::new(store, template, config));

    // --- Start server ---
    tracing::info!(%addr, prefix = API_PREFIX, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// PostgreSQL when `DATABASE_URL` is set, otherwise an in-process store
/// whose contents are lost on exit.
async fn build_store(config: &ServerConfig) -> Result<Arc<dyn ModuleStore>, StartupError> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL is not set, using the in-memory module store");
        return Ok(Arc::new(MemoryModuleStore::new()));
    };

    let pool = parametria_db::create_pool(database_url, config.database_max_connections).await?;
    tracing::info!("Connected to PostgreSQL");

    parametria_db::health_check(&pool).await?;
    tracing::info!("PostgreSQL answered ping");

    parametria_db::run_migrations(&pool).await?;
    tracing::info!("Module schema up to date");

    Ok(Arc::new(PgModuleStore::new(pool)))
}

/// Resolves on Ctrl-C, or on SIGTERM under Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Ctrl-C received, draining connections");
        }
        () = terminate => {
            tracing::info!("SIGTERM received, draining connections");
        }
    }
}
