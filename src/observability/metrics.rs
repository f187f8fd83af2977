//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dex_bootstrap_steps_total` (counter): bootstrap steps reached, by step
//! - `dex_bootstrap_outcomes_total` (counter): finished bootstraps, by outcome
//! - `dex_bootstrap_duration_seconds` (histogram): time from mount to ready
//! - `dex_client_requests_total` (counter): LCD requests, by endpoint and status

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_bootstrap_step(step: &'static str) {
    metrics::counter!("dex_bootstrap_steps_total", "step" => step).increment(1);
}

pub fn record_bootstrap_outcome(outcome: &'static str, elapsed: Duration) {
    metrics::counter!("dex_bootstrap_outcomes_total", "outcome" => outcome).increment(1);
    metrics::histogram!("dex_bootstrap_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_client_request(endpoint: &'static str, status: &str) {
    metrics::counter!(
        "dex_client_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}
