use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_server::build_router;
use catalog_server::config::AppConfig;
use catalog_server::database::{ensure_indexes, init_db};
use catalog_server::state::AppState;
use catalog_server::storage::build_object_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    ensure_indexes(&db)
        .await
        .context("Failed to create database indexes")?;

    let store = build_object_store(&config.storage)
        .await
        .context("Failed to initialize object store")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { db, store, config };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
