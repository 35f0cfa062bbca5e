use std::sync::Arc;

use anyhow::Context;
use common::metadata::ExifTool;
use server::config::AppConfig;
use server::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load config")?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(config.log.max_level())
        .init();

    let tool = Arc::new(ExifTool::new(&config.metadata));
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(config, tool)
        .await
        .context("Failed to open image directories")?;
    info!(root = %state.config.storage.root.display(), "Image store ready");

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
