//! Route dispatch demo server.
//!
//! Registers a handful of routes and serves them over HTTP until Ctrl+C or
//! SIGTERM.

use std::path::PathBuf;

use clap::Parser;

use route_dispatch::config::{load_config, AppConfig};
use route_dispatch::lifecycle::{signals, startup, Shutdown};
use route_dispatch::observability::logging::init_logging;
use route_dispatch::routing::{HandlerError, RouteError, RouteTable, Signature};
use route_dispatch::Params;

#[derive(Parser)]
#[command(name = "route-dispatch")]
#[command(about = "Serve a table of routes over HTTP", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn demo_routes() -> Result<RouteTable, RouteError> {
    let mut table = RouteTable::new();
    table
        .register_with(
            axum::http::Method::GET,
            "/{path}",
            Signature::new().required("path").optional("draft").optional("skip"),
            |p: &Params| -> Result<String, HandlerError> {
                tracing::info!(draft = ?p.get("draft"), skip = ?p.get("skip"), "Query parameters");
                Ok(format!("Welcome to path: {}!", p.require("path")?))
            },
        )?
        .get("/users/{id}", |p: &Params| -> Result<String, HandlerError> {
            Ok(format!("User {}", p.require("id")?))
        })?
        .get(
            "/users/{userId}/posts/{postId}",
            |p: &Params| -> Result<String, HandlerError> {
                Ok(format!(
                    "User {}, Post {}",
                    p.require("userId")?,
                    p.require("postId")?
                ))
            },
        )?
        .post("/hello", |_: &Params| -> Result<&'static str, HandlerError> {
            Ok("Saying hello and plenty greetings to you...")
        })?;
    Ok(table)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let routes = demo_routes()?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    startup::serve(config, routes, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
