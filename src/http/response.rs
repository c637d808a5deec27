//! Not-found responses for aborted dispatches.
//!
//! # Responsibilities
//! - Render the single 404 response every dispatch failure maps to
//! - Tag it with an [`Aborted`] extension so outer layers can tell an
//!   aborted dispatch from a 404 written by a method
//!
//! # Design Decisions
//! - Body and headers match the conventional plain-text 404 page
//! - Client input never produces a 5xx here

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

use crate::routing::error::DispatchError;

/// Body of every not-found response.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Marker left in the extensions of a response produced by an aborted
/// dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Aborted(pub DispatchError);

/// Build the 404 response for a failed dispatch.
pub fn not_found(reason: DispatchError) -> Response {
    let mut response = Response::new(Body::from(NOT_FOUND_BODY));
    *response.status_mut() = StatusCode::NOT_FOUND;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.extensions_mut().insert(Aborted(reason));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_shape() {
        let response = not_found(DispatchError::MethodNotFound("nope".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.extensions().get::<Aborted>(),
            Some(&Aborted(DispatchError::MethodNotFound("nope".into())))
        );

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], NOT_FOUND_BODY.as_bytes());
    }
}
