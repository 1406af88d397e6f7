//! # statusboardd: statusboard daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing` from the configured filter
//! - Construct the configured status source (HTTP or file)
//! - Construct the board service and start the poller
//! - Build the axum router, injecting the service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), stopping the poller too
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use statusboard_adapter_http_axum::router;
use statusboard_adapter_http_axum::state::AppState;
use statusboard_adapter_source_file::FileStatusSource;
use statusboard_adapter_source_http_reqwest::HttpStatusSource;
use statusboard_app::poller::Poller;
use statusboard_app::ports::StatusSource;
use statusboard_app::services::board_service::BoardService;

use crate::config::{Config, SourceKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    match config.source.kind {
        SourceKind::Http => {
            let source = HttpStatusSource::from_config(&config.source.http())?;
            tracing::info!(url = source.url(), "polling collector over HTTP");
            run(&config, source).await
        }
        SourceKind::File => {
            let source = FileStatusSource::new(&config.source.path);
            tracing::info!(path = %source.path().display(), "polling stats file");
            run(&config, source).await
        }
    }
}

async fn run<S>(config: &Config, source: S) -> Result<(), Box<dyn std::error::Error>>
where
    S: StatusSource + Send + Sync + 'static,
{
    let service = Arc::new(BoardService::new(source));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = Poller::start(Arc::clone(&service), shutdown_rx);

    let app = router::build(AppState::from_arc(service));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "statusboardd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // fails only if the poller already exited
    let _ = shutdown_tx.send(true);
    poller.await?;
    tracing::info!("statusboardd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
