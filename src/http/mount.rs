//! Mounting dispatchers under URL prefixes.
//!
//! A mount at `/article` answers `/article`, `/article/` and everything
//! below `/article/{*path}`. The two roots reach the dispatcher with an
//! empty capture.

use axum::routing::MethodRouter;
use axum::Router;

use crate::routing::dispatcher::WILDCARD_PARAM;

/// Register `route` at `prefix` and below it.
pub fn mount<S>(router: Router<S>, prefix: &str, route: MethodRouter<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let base = normalize_prefix(prefix);
    let wildcard = format!("{}/{{*{}}}", base, WILDCARD_PARAM);

    let router = if base.is_empty() {
        router.route("/", route.clone())
    } else {
        router
            .route(&base, route.clone())
            .route(&format!("{}/", base), route.clone())
    };
    router.route(&wildcard, route)
}

/// Strip trailing slashes and ensure a single leading one; the root mount
/// normalizes to the empty string.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/article/"), "/article");
        assert_eq!(normalize_prefix("api/v1"), "/api/v1");
    }
}
