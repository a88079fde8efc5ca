//! Metrics collection and exposition.
//!
//! # Metrics
//! - `translate_requests_total` (counter): requests by method, status
//! - `translate_request_duration_seconds` (histogram): handler latency
//! - `translate_upstream_calls_total` (counter): upstream calls by model, outcome
//! - `translate_upstream_duration_seconds` (histogram): upstream latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "translate_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("translate_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record one call to the translation model. `outcome` is `"ok"` or an
/// error kind.
pub fn record_upstream(model: &str, outcome: &'static str, start: Instant) {
    counter!(
        "translate_upstream_calls_total",
        "model" => model.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("translate_upstream_duration_seconds", "model" => model.to_string())
        .record(start.elapsed().as_secs_f64());
}
