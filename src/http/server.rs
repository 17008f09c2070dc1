//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single fallback into the dispatcher
//! - Wire up middleware (request ID, tracing, timeout, concurrency limit)
//! - Serve on a listener with graceful shutdown

use std::future::Future;
use std::time::Duration;

use axum::{
    extract::State,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{request_target, X_REQUEST_ID};
use crate::http::response::worker_failure;
use crate::routing::Dispatcher;

/// HTTP front end for a [`Dispatcher`].
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    pub fn new(config: AppConfig, dispatcher: Dispatcher) -> Self {
        let router = Self::build_router(&config, dispatcher);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, dispatcher: Dispatcher) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(dispatcher)
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The fully layered router, for in-process use (e.g. `tower::ServiceExt::oneshot`).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Forward every request to the dispatcher.
///
/// Handlers are user code that may block, so dispatch runs on the blocking pool.
async fn dispatch_handler(
    State(dispatcher): State<Dispatcher>,
    method: Method,
    uri: Uri,
) -> Response {
    let target = request_target(&uri);

    let task_method = method.clone();
    let task_target = target.clone();
    let result =
        tokio::task::spawn_blocking(move || dispatcher.dispatch(&task_method, &task_target)).await;

    match result {
        Ok(outcome) => outcome.into_response(),
        Err(e) => {
            tracing::error!(method = %method, target = %target, error = %e, "Dispatch task failed");
            worker_failure()
        }
    }
}
