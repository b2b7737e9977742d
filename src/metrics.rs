//! Prometheus metrics for status requests.
//!
//! Recording goes through the `metrics` facade and is a no-op until a recorder
//! is installed with [`install_exporter`], which also registers descriptions.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{debug, info};

use crate::error::{FetchError, PollerError};

// === Metric Name Constants ===

/// Status request counter metric name.
pub const METRIC_STATUS_REQUESTS: &str = "status_requests_total";
/// Status request latency metric name.
pub const METRIC_STATUS_REQUEST_LATENCY: &str = "status_request_latency_ms";
/// Scheduled health ticks counter metric name.
pub const METRIC_HEALTH_TICKS: &str = "health_check_ticks_total";

/// Initialize all metric descriptions.
/// Descriptions go to the current recorder, so call this after one is installed.
pub fn init_metrics() {
    describe_counter!(
        METRIC_STATUS_REQUESTS,
        "Total status endpoint requests by endpoint and outcome"
    );
    describe_histogram!(
        METRIC_STATUS_REQUEST_LATENCY,
        "Status endpoint request latency in milliseconds"
    );
    describe_counter!(
        METRIC_HEALTH_TICKS,
        "Total health checks started by the interval timer"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter with an HTTP listener on `port`.
pub fn install_exporter(port: u16) -> Result<(), PollerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| PollerError::Metrics(e.to_string()))?;

    init_metrics();
    info!("Prometheus exporter listening on {}", addr);
    Ok(())
}

/// Record one finished status request.
pub fn record_request(endpoint: &'static str, start: Instant, error: Option<&FetchError>) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    let outcome = error.map(FetchError::kind).unwrap_or("success");

    histogram!(METRIC_STATUS_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
    counter!(METRIC_STATUS_REQUESTS, "endpoint" => endpoint, "outcome" => outcome).increment(1);
}

/// Increment the scheduled health tick counter.
pub fn inc_health_ticks() {
    counter!(METRIC_HEALTH_TICKS).increment(1);
}
