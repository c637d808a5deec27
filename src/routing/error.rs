//! Dispatch error types.
//!
//! Every variant of [`DispatchError`] is answered with the same 404 response;
//! the variants only exist for logging and for layers that inspect
//! [`Aborted`](crate::http::response::Aborted).

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::not_found;
use crate::routing::kind::Kind;

/// Errors produced while converting a path segment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Token is not valid syntax for the kind.
    #[error("invalid {kind} literal: {token:?}")]
    Invalid { token: String, kind: Kind },

    /// Token is well formed but does not fit the kind's width.
    #[error("{token:?} is out of range for {kind}")]
    OutOfRange { token: String, kind: Kind },

    /// Kind has no converter.
    #[error("unsupported parameter kind: {0}")]
    UnsupportedKind(Kind),

    /// A converted value was handed to a parameter of another kind.
    #[error("expected {expected} value, found {found}")]
    KindMismatch { expected: Kind, found: Kind },

    /// The invoker ran out of converted values.
    #[error("missing {0} argument")]
    MissingValue(Kind),
}

/// Reasons a request could not be routed to a method.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The wildcard capture could not be decoded.
    #[error("undecodable path: {0}")]
    UndecodablePath(String),

    /// No method is registered under the derived key.
    #[error("no method matches {0:?}")]
    MethodNotFound(String),

    /// Fewer path segments than fixed parameters.
    #[error("method {method:?} needs {required} arguments, got {given}")]
    ArgumentCount {
        method: String,
        required: usize,
        given: usize,
    },

    /// A segment failed to convert to its parameter kind.
    #[error("argument {index} of method {method:?} rejected")]
    Conversion {
        method: String,
        index: usize,
        #[source]
        source: ConvertError,
    },

    /// Converted values did not bind to the method's parameters.
    #[error("arguments of method {method:?} do not fit its signature")]
    Binding {
        method: String,
        #[source]
        source: ConvertError,
    },
}

impl DispatchError {
    /// Short label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            DispatchError::UndecodablePath(_) => "undecodable_path",
            DispatchError::MethodNotFound(_) => "method_not_found",
            DispatchError::ArgumentCount { .. } => "argument_count",
            DispatchError::Conversion { .. } => "conversion",
            DispatchError::Binding { .. } => "binding",
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        not_found(self)
    }
}
