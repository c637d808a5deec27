//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Mount a handler's dispatcher at every configured prefix
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{MountConfig, RouterConfig};
use crate::http::mount::mount;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::routing::{AutoRoute, Routes};

/// HTTP server hosting auto-routed handlers.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Wrap an application router with the server's middleware layers.
    pub fn new(config: RouterConfig, app: Router) -> Self {
        let router = Self::layer(&config, app);
        Self { router, config }
    }

    /// Build a server that mounts `handler` at every configured mount.
    pub fn for_handler<H: Routes>(config: RouterConfig, handler: Arc<H>) -> Self {
        let app = mount_all(Router::new(), &config.mounts, handler);
        Self::new(config, app)
    }

    #[allow(deprecated)]
    fn layer(config: &RouterConfig, app: Router) -> Router {
        let header = HeaderName::from_static(X_REQUEST_ID);
        app.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header.clone(), UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(header))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                ))),
        )
    }

    /// The fully layered router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, mounts = self.config.mounts.len(), "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Mount one dispatcher per entry of `mounts`, all sharing `handler`.
pub fn mount_all<H: Routes>(router: Router, mounts: &[MountConfig], handler: Arc<H>) -> Router {
    mounts.iter().fold(router, |router, m| {
        tracing::debug!(prefix = %m.prefix, mode = ?m.mode, style = ?m.style, "Mounting handler");
        let route = AutoRoute::from_arc(handler.clone())
            .mode(m.mode)
            .style(m.style)
            .into_method_router();
        mount(router, &m.prefix, route)
    })
}
