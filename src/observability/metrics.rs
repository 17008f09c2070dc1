//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatch_requests_total` (counter): requests by method, status
//! - `dispatch_duration_seconds` (histogram): dispatch latency by method

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const DISPATCH_REQUESTS_TOTAL: &str = "dispatch_requests_total";
pub const DISPATCH_DURATION_SECONDS: &str = "dispatch_duration_seconds";

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one dispatched request.
pub fn record_dispatch(method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        DISPATCH_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!(DISPATCH_DURATION_SECONDS, "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}
