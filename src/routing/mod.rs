//! Method routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (once):
//!     handler: impl Routes
//!     → method.rs (declared method set, typed invokers)
//!     → introspect.rs (filter by Mode, index by lower-cased name)
//!     → HandlerTable (immutable, shared via Arc)
//!
//! Per request:
//!     verb + captured path
//!     → path.rs (method key + argument segments)
//!     → dispatcher.rs (lookup, count check)
//!     → kind.rs (segment → typed Value)
//!     → Method::invoke(Context, values) → Response
//!     any failure → 404 + Aborted
//! ```
//!
//! # Design Decisions
//! - No runtime reflection: handlers declare their methods explicitly
//! - All dispatch failures look identical to the client
//! - Deterministic: same table and request always pick the same method

pub mod dispatcher;
pub mod error;
pub mod introspect;
pub mod kind;
pub mod method;
pub mod path;

pub use dispatcher::{auto_route, auto_route_any, rest, rest_any, AutoRoute, Dispatcher};
pub use error::{ConvertError, DispatchError};
pub use introspect::{introspect, HandlerTable, Mode};
pub use kind::{convert, Kind, Param, Value};
pub use method::{Method, MethodSet, Routes, Signature};
pub use path::PathStyle;
