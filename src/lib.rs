//! Reflection-free automatic routing of HTTP requests to handler methods.
//!
//! A handler declares its method set once through [`Routes`]; each request
//! is then mapped to a method by verb or first path segment, its path
//! segments are converted to the method's parameter types, and the method
//! is invoked. Anything that does not line up is answered with a 404.

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::RouterConfig;
pub use http::{mount, Context, HttpServer};
pub use lifecycle::Shutdown;
pub use routing::{
    auto_route, auto_route_any, rest, rest_any, AutoRoute, Dispatcher, MethodSet, Mode,
    PathStyle, Routes,
};
