//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lookup_requests_total` (counter): lookups by outcome and winning api
//! - `lookup_duration_seconds` (histogram): race latency distribution
//!
//! # Design Decisions
//! - Prometheus exporter on its own listener, enabled via config
//! - Recording is a no-op until the exporter is installed, so the lookup
//!   path never cares whether metrics are enabled

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed lookup.
///
/// `api` is the winning upstream's identity, empty on failure or timeout.
pub fn record_lookup(outcome: &str, api: &str, started: Instant) {
    counter!(
        "lookup_requests_total",
        "outcome" => outcome.to_string(),
        "api" => api.to_string()
    )
    .increment(1);

    histogram!("lookup_duration_seconds", "outcome" => outcome.to_string())
        .record(started.elapsed().as_secs_f64());
}
