//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all request logs (tower-http layers)
//! - Metrics are cheap (atomic increments)
//! - The diagnostics channel is a plain tracing target; no extra machinery

pub mod logging;
pub mod metrics;
