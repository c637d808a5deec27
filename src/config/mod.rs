//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → mounts drive dispatcher registration at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; method tables are built from it once
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, MountConfig, ObservabilityConfig, RouterConfig, TimeoutConfig};
pub use validation::ValidationError;
