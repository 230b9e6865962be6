//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bff_requests_total` (counter): inbound requests by route, method, status
//! - `bff_request_duration_seconds` (histogram): inbound latency
//! - `bff_upstream_requests_total` (counter): outbound calls by host, outcome
//! - `bff_upstream_duration_seconds` (histogram): outbound latency
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound request.
pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!(
        "bff_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "bff_request_duration_seconds",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one outbound call. `outcome` is a status code or `"error"`.
pub fn record_upstream(host: &str, outcome: &str, start: Instant) {
    metrics::counter!(
        "bff_upstream_requests_total",
        "upstream" => host.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "bff_upstream_duration_seconds",
        "upstream" => host.to_string(),
        "outcome" => outcome.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
