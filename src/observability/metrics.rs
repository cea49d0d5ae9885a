//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define host module metrics (notifications, shutdowns, applications)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `worker_host_notifications_total` (counter): notifications by kind
//! - `worker_host_shutdowns_started_total` (counter): shutdowns by mode
//! - `worker_host_running_applications` (gauge): current registry size
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Exporter failure is logged and ignored; the host runs without metrics

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape listener.
///
/// Must be called from within the tokio runtime. Failure to bind is not
/// fatal to the host.
pub fn init_metrics(address: SocketAddr) {
    match PrometheusBuilder::new()
        .with_http_listener(address)
        .install()
    {
        Ok(()) => {
            tracing::info!(%address, "Metrics endpoint listening");
        }
        Err(error) => {
            tracing::error!(%error, "Failed to install metrics exporter");
        }
    }
}

/// Count a host notification by kind.
pub fn record_notification(kind: &'static str) {
    metrics::counter!("worker_host_notifications_total", "kind" => kind).increment(1);
}

/// Count a shutdown trigger by execution mode ("inline" or "delayed").
pub fn record_shutdown_started(mode: &'static str) {
    metrics::counter!("worker_host_shutdowns_started_total", "mode" => mode).increment(1);
}

/// Track the number of registered applications.
pub fn record_running_applications(count: usize) {
    metrics::gauge!("worker_host_running_applications").set(count as f64);
}
