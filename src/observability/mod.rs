//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registration and dispatch produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (dispatch outcome counters)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows into every routed method through the context
//! - Metrics are cheap (atomic increments) and no-ops until a recorder
//!   is installed

pub mod logging;
pub mod metrics;
