//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use auto_router::config::RouterConfig;
use auto_router::{Context, HttpServer, MethodSet, Routes, Shutdown};
use axum::body::Body;
use axum::http::{Request, Response};
use tokio::net::TcpListener;

/// Scenario handler: two context-only methods, two typed ones and a
/// variadic sum. Counts every invocation.
#[derive(Default)]
pub struct T {
    pub calls: AtomicUsize,
}

impl T {
    async fn get(self: Arc<Self>, _ctx: Context) -> &'static str {
        self.calls.fetch_add(1, Ordering::SeqCst);
        "hello from T.Get"
    }

    async fn post(self: Arc<Self>, _ctx: Context) -> &'static str {
        self.calls.fetch_add(1, Ordering::SeqCst);
        "hello from T.Post"
    }

    async fn delete(self: Arc<Self>, _ctx: Context, id: isize) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        format!("hello from T.Delete {}", id)
    }

    async fn hello(self: Arc<Self>, _ctx: Context, name: String) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        format!("hello {}", name)
    }

    async fn add_int(self: Arc<Self>, _ctx: Context, nums: Vec<isize>) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        nums.iter().sum::<isize>().to_string()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Routes for T {
    fn methods(set: &mut MethodSet<Self>) {
        set.method("Get", T::get)
            .method("Post", T::post)
            .method("Delete", T::delete)
            .method("Hello", T::hello)
            .variadic("AddInt", T::add_int);
    }
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start a server for `handler` on an ephemeral port.
pub async fn start_server<H: Routes>(
    config: RouterConfig,
    handler: Arc<H>,
) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::for_handler(config, handler);
    let signal = shutdown.signal();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    (addr, shutdown)
}
