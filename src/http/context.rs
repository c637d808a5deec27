//! Per-request context handed to every routed method.
//!
//! # Responsibilities
//! - Carry the incoming request (verb, URI, headers, extensions, body)
//! - Expose the captured wildcard path and the resolved method key
//!
//! # Design Decisions
//! - Owned by the invoked method; the body can be consumed exactly once
//! - Responses are written by returning `impl IntoResponse`, not through
//!   the context

use std::fmt;

use axum::body::{Body, Bytes};
use axum::http::{Extensions, HeaderMap, Method, Request, Uri};

use crate::http::request::X_REQUEST_ID;

/// The request context, always the first parameter of a routed method.
pub struct Context {
    request: Request<Body>,
    captured: String,
    method_key: String,
}

impl Context {
    pub(crate) fn new(request: Request<Body>, captured: String, method_key: String) -> Self {
        Self {
            request,
            captured,
            method_key,
        }
    }

    /// HTTP verb of the request.
    pub fn method(&self) -> &Method {
        self.request.method()
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    pub fn extensions(&self) -> &Extensions {
        self.request.extensions()
    }

    /// The wildcard capture exactly as the router delivered it.
    pub fn captured_path(&self) -> &str {
        &self.captured
    }

    /// Key the method was resolved under, before lower-casing.
    pub fn method_key(&self) -> &str {
        &self.method_key
    }

    /// Value of the `x-request-id` header, when present and valid UTF-8.
    pub fn request_id(&self) -> Option<&str> {
        self.request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }

    /// Read the whole body, up to `limit` bytes.
    pub async fn body_bytes(self, limit: usize) -> Result<Bytes, axum::Error> {
        axum::body::to_bytes(self.request.into_body(), limit).await
    }

    pub fn into_request(self) -> Request<Body> {
        self.request
    }

    #[cfg(test)]
    pub(crate) fn for_test(verb: &str, captured: &str) -> Self {
        let request = Request::builder()
            .method(verb)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        Self::new(request, captured.to_string(), verb.to_string())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("method", self.request.method())
            .field("uri", self.request.uri())
            .field("captured", &self.captured)
            .field("method_key", &self.method_key)
            .finish()
    }
}
