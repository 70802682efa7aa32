//! Metrics collection and exposition.
//!
//! # Metrics
//! - `frontdoor_requests_total` (counter): forwarded requests by method, status, service
//! - `frontdoor_request_duration_seconds` (histogram): forward latency
//! - `frontdoor_service_health` (gauge): 1=reachable, 0=unreachable, per service
//! - `frontdoor_sentinel_ticks_total` (counter): completed sentinel ticks
//! - `frontdoor_sentinel_block_failures_total` (counter): failures by block
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one forwarded request.
pub fn record_request(method: &str, status: u16, service: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("service", service.to_string()),
    ];
    counter!("frontdoor_requests_total", &labels).increment(1);
    histogram!("frontdoor_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a service health probe.
pub fn record_service_health(service: &str, healthy: bool) {
    gauge!("frontdoor_service_health", "service" => service.to_string())
        .set(if healthy { 1.0 } else { 0.0 });
}

pub fn record_sentinel_tick() {
    counter!("frontdoor_sentinel_ticks_total").increment(1);
}

pub fn record_block_failure(block: &str) {
    counter!("frontdoor_sentinel_block_failures_total", "block" => block.to_string()).increment(1);
}
