//! auto-router demo server.
//!
//! Serves a small handler through every mount of the configuration:
//!
//! ```text
//! GET    /                 → Get
//! POST   /                 → Post
//! GET    /hello/{name}     → Hello
//! GET    /addint/1/2/3     → AddInt  ("6")
//! DELETE /42   (rest)      → Delete
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;

use auto_router::config::{load_config, RouterConfig};
use auto_router::lifecycle::signals::spawn_signal_listener;
use auto_router::observability::{logging, metrics};
use auto_router::{Context, HttpServer, MethodSet, Routes, Shutdown};

#[derive(Parser)]
#[command(name = "auto-router")]
#[command(about = "Route HTTP requests to handler methods by name", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

/// Demo handler.
struct Demo;

impl Demo {
    async fn get(self: Arc<Self>, ctx: Context) -> Json<serde_json::Value> {
        Json(json!({
            "method": "Get",
            "request_id": ctx.request_id(),
        }))
    }

    async fn post(self: Arc<Self>, _ctx: Context) -> &'static str {
        "hello from Demo.Post"
    }

    async fn delete(self: Arc<Self>, _ctx: Context, id: i64) -> String {
        tracing::info!(id, "Delete called");
        format!("deleted {}", id)
    }

    async fn hello(self: Arc<Self>, _ctx: Context, name: String) -> String {
        format!("hello {}", name)
    }

    async fn add_int(self: Arc<Self>, _ctx: Context, nums: Vec<i64>) -> String {
        nums.iter().sum::<i64>().to_string()
    }
}

impl Routes for Demo {
    fn methods(set: &mut MethodSet<Self>) {
        set.method("Get", Demo::get)
            .method("Post", Demo::post)
            .method("Delete", Demo::delete)
            .method("Hello", Demo::hello)
            .variadic("AddInt", Demo::add_int);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability)?;
    tracing::info!("auto-router v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let server = HttpServer::for_handler(config, Arc::new(Demo));
    server.run(listener, shutdown.signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
