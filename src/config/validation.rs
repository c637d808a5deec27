//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting mounts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::http::mount::normalize_prefix;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level: unknown level {0:?}")]
    UnknownLogLevel(String),

    #[error("mounts[{index}].prefix {prefix:?} must start with '/'")]
    RelativePrefix { index: usize, prefix: String },

    #[error("mounts[{index}].prefix {prefix:?} must not contain route syntax")]
    PrefixSyntax { index: usize, prefix: String },

    #[error("mounts[{index}].prefix {prefix:?} is mounted twice")]
    DuplicatePrefix { index: usize, prefix: String },
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for (index, mount) in config.mounts.iter().enumerate() {
        let prefix = &mount.prefix;
        if !prefix.starts_with('/') {
            errors.push(ValidationError::RelativePrefix {
                index,
                prefix: prefix.clone(),
            });
        }
        if prefix.contains(['{', '}', '*'])
            || prefix.split('/').any(|segment| segment.starts_with(':'))
        {
            errors.push(ValidationError::PrefixSyntax {
                index,
                prefix: prefix.clone(),
            });
        }
        if !seen.insert(normalize_prefix(prefix)) {
            errors.push(ValidationError::DuplicatePrefix {
                index,
                prefix: prefix.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
