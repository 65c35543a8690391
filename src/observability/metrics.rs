//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pdf_conversions_total` (counter): conversions by outcome
//! - `pdf_conversion_duration_seconds` (histogram): render latency by outcome
//! - `pdf_document_bytes` (histogram): size of produced documents
//! - `pdf_renders_in_flight` (gauge): renderer processes currently running
//! - `pdf_requests_rejected_total` (counter): client errors by reason

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished conversion attempt.
pub fn record_conversion(outcome: &'static str, started: Instant) {
    ::metrics::counter!("pdf_conversions_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("pdf_conversion_duration_seconds", "outcome" => outcome)
        .record(started.elapsed().as_secs_f64());
}

/// Record the size of a produced document.
pub fn record_document_size(bytes: usize) {
    ::metrics::histogram!("pdf_document_bytes").record(bytes as f64);
}

/// Record a request rejected before rendering.
pub fn record_rejected(reason: &'static str) {
    ::metrics::counter!("pdf_requests_rejected_total", "reason" => reason).increment(1);
}

/// Tracks one running render in `pdf_renders_in_flight` until dropped.
pub struct InFlightGuard(());

impl InFlightGuard {
    pub fn start() -> Self {
        ::metrics::gauge!("pdf_renders_in_flight").increment(1.0);
        Self(())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        ::metrics::gauge!("pdf_renders_in_flight").decrement(1.0);
    }
}
