use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use fastfoodfast::{
    create_app, init_observability, services::SystemClock, shutdown_observability,
    ApiState, Config, Metrics, RouterOptions,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    init_observability(&config.observability).context("Failed to initialize observability")?;

    info!(
        "Starting {} v{}",
        config.observability.service_name, config.observability.service_version
    );

    let closing = config.orders.closing()?;
    info!("Orders close at {}", closing);

    let metrics = Arc::new(Metrics::new().context("Failed to register metrics")?);
    let state = ApiState::in_memory(closing, Arc::new(SystemClock), metrics);

    let app = create_app(
        state,
        RouterOptions {
            api_prefix: config.server.api_prefix.clone(),
            request_timeout: config.server.request_timeout(),
        },
    );

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .with_context(|| format!("Invalid host address: {}", config.server.host))?,
        config.server.port,
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }

    shutdown_observability().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
