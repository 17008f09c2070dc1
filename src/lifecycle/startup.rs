//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Bind the listener
//! - Freeze the route table and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Routes are registered before this point; serving starts last

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::{Dispatcher, RouteTable};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid address '{0}'")]
    Address(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve `routes` with `config` until `shutdown` fires.
pub async fn serve(
    config: AppConfig,
    routes: RouteTable,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::Address(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        routes = routes.len(),
        "Listening for connections"
    );

    let dispatcher = Dispatcher::new(routes);
    let server = HttpServer::new(config, dispatcher);
    server.run(listener, shutdown.notified()).await?;
    Ok(())
}
