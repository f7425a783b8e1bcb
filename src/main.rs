//! eventflow server entry point.
//!
//! Picks the backend from configuration and serves the page router.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use eventflow::api;
use eventflow::app_state::AppState;
use eventflow::backend::{Backend, MemoryBackend, PostgresBackend};
use eventflow::config::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting eventflow");

    // Build backend
    let backend: Arc<dyn Backend> = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("connected to PostgreSQL, migrations applied");
        Arc::new(PostgresBackend::new(pool))
    } else {
        tracing::warn!("persistence disabled, data lives in memory only");
        Arc::new(MemoryBackend::new())
    };

    // Build application
    let app = api::build_app(AppState::new(backend, &config));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
