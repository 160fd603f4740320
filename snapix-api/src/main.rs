use anyhow::Context;
use snapix_api::config::AppConfig;
use snapix_api::{app, observability, state};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    observability::init(config.is_dev());
    config.validate().context("invalid configuration")?;

    let runtime = state::compose(&config)
        .await
        .context("failed to compose application")?;
    let router = app::build_app(&runtime);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()?));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, version = %runtime.state.version, "Snapix project listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    runtime.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
