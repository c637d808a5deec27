//! Metrics collection and exposition.
//!
//! # Metrics
//! - `autoroute_dispatch_total` (counter): dispatches by outcome
//!   (`invoked`, `method_not_found`, `argument_count`, `conversion`)
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder it costs nothing
//! - The Prometheus exporter is opt-in via config

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const DISPATCH_TOTAL: &str = "autoroute_dispatch_total";

/// Count one dispatch outcome.
pub fn record_dispatch(outcome: &'static str) {
    metrics::counter!(DISPATCH_TOTAL, "outcome" => outcome).increment(1);
}

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}
