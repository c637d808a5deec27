//! Captured path parsing.
//!
//! Turns the wildcard capture of a mount into a method key and an ordered
//! argument list. Two styles exist:
//!
//! ```text
//! Simple:  GET /hello/world   → key "hello", args ["world"]
//!          GET /              → key "GET",   args []
//! Rest:    DELETE /42         → key "DELETE", args ["42"]
//!          GET /              → key "GET",    args []
//! ```

use serde::{Deserialize, Serialize};

/// How the captured path is split into a method key and arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// First segment names the method; the verb is used when the path is empty.
    #[default]
    Simple,
    /// The verb names the method; every segment is an argument.
    Rest,
}

/// Method key and arguments derived from one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub method_key: String,
    pub args: Vec<String>,
}

impl PathStyle {
    pub fn parse(&self, verb: &str, path: &str) -> ParsedPath {
        match self {
            PathStyle::Simple => parse_simple(verb, path),
            PathStyle::Rest => parse_rest(verb, path),
        }
    }
}

pub fn parse_simple(verb: &str, path: &str) -> ParsedPath {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return ParsedPath {
            method_key: verb.to_string(),
            args: Vec::new(),
        };
    }

    let mut segments = trimmed.split('/');
    // split always yields at least one element
    let method_key = segments.next().unwrap_or_default().to_string();
    ParsedPath {
        method_key,
        args: segments.map(str::to_string).collect(),
    }
}

pub fn parse_rest(verb: &str, path: &str) -> ParsedPath {
    let trimmed = path.trim_matches('/');
    // An empty capture carries no arguments rather than a single empty one.
    let args = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').map(str::to_string).collect()
    };
    ParsedPath {
        method_key: verb.to_string(),
        args,
    }
}
