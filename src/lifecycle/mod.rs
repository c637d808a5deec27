//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() or signal → broadcast → server stops accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGINT/Ctrl+C, SIGTERM → graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Method tables are built before the listener binds; nothing is
//!   registered once traffic flows
//! - Shutdown drains in-flight requests, it never cancels a running method

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
