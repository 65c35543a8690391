//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and renderer produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request span
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
