//! Chat relay service.
//!
//! A small WebSocket chat service built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 CHAT RELAY                    │
//!                    │                                               │
//!   HTTP request     │  ┌─────────┐   ┌─────────────────────────┐   │
//!   ─────────────────┼─▶│  http   │──▶│ /test /chatting probes  │   │
//!                    │  │ server  │   ├─────────────────────────┤   │
//!                    │  └─────────┘   │ /register /login (auth) │   │
//!                    │                ├─────────────────────────┤   │
//!   WebSocket        │                │ /ws chat sessions       │   │
//!   ─────────────────┼───────────────▶│   rooms + history       │   │
//!                    │                └─────────────────────────┘   │
//!                    │                                               │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns           │ │
//!                    │  │  config reload │ logging │ metrics │      │ │
//!                    │  │  rate limits   │ lifecycle (signals)      │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use chat_relay::config::loader::load_config;
use chat_relay::config::watcher::ConfigWatcher;
use chat_relay::config::{AuthConfig, RelayConfig};
use chat_relay::http::HttpServer;
use chat_relay::lifecycle::{signals, Shutdown};
use chat_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "chat-relay")]
#[command(about = "WebSocket chat relay with diagnostic endpoints", long_about = None)]
struct Args {
    /// Path to a TOML config file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "chat-relay starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        default_room = %config.chat.default_room,
        history_capacity = config.chat.history_capacity,
        replay_count = config.chat.replay_count,
        "Configuration loaded"
    );

    if config.auth.jwt_secret == AuthConfig::default().jwt_secret {
        tracing::warn!("auth.jwt_secret is the built-in placeholder; tokens are forgeable");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            signals::wait_for_signal().await;
            shutdown.trigger();
        }
    });

    // Keep the watcher handle alive for the life of the server.
    let mut _watcher = None;
    let config_updates = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            _watcher = Some(watcher.run()?);
            updates
        }
        None => mpsc::unbounded_channel().1,
    };

    let server = HttpServer::new(config);
    server
        .run(listener, config_updates, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
