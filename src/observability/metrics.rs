//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatches by method, status, route
//! - `router_request_duration_seconds` (histogram): dispatch latency
//!
//! # Design Decisions
//! - Route label is the matched template (bounded cardinality: the table is
//!   fixed at startup), or "none" for 404s
//! - Exporter failures are logged, never fatal

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "router_requests_total",
                "Total dispatched requests by method, status and route"
            );
            describe_histogram!(
                "router_request_duration_seconds",
                "Dispatch latency in seconds"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one dispatch outcome.
pub fn record_dispatch(method: &str, status: u16, route: &str, start: Instant) {
    counter!(
        "router_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string()
    )
    .increment(1);

    histogram!(
        "router_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
