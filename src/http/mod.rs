//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower-http layers)
//!     → request.rs (request ID)
//!     → mount.rs (prefix + {*path} wildcard → dispatcher)
//!     → context.rs (request handed to the routed method)
//!     → method response, or response.rs (404 + Aborted)
//!     → Send to client
//! ```

pub mod context;
pub mod mount;
pub mod request;
pub mod response;
pub mod server;

pub use context::Context;
pub use mount::mount;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{not_found, Aborted};
pub use server::HttpServer;
