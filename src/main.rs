use anyhow::Context;
use tracing_subscriber::EnvFilter;

use comprehensive_api::auth::CredentialRegistry;
use comprehensive_api::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up APP_ENV, API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config().context("invalid configuration")?.clone();
    tracing::info!("Starting Comprehensive API in {:?} mode", config.environment);

    let registry = CredentialRegistry::reference();
    tracing::info!("Loaded {} API keys", registry.len());

    let bind_addr = config.bind_addr();
    let state = AppState::new(config, registry).context("invalid API key header name")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Comprehensive API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
