//! CEP lookup service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────┐
//!                    │                CEP LOOKUP                   │
//!                    │                                             │
//!   GET /cep?cep=..  │  ┌──────┐   ┌────────┐   ┌──────────────┐  │
//!   ─────────────────┼─▶│ http │──▶│ lookup │──▶│  race core   │  │
//!                    │  └──────┘   └────────┘   └──────┬───────┘  │
//!                    │                                  │          │
//!                    │                     one task per upstream   │
//!                    │                    ┌─────────┬─────────┐    │
//!   JSON response    │  ┌──────────┐     ▼         ▼         │    │
//!   ◀────────────────┼──│  shaper  │◀─ BrasilAPI  ViaCEP  …  │    │
//!                    │  └──────────┘   (first success wins)  │    │
//!                    │                                             │
//!                    │  config · observability · lifecycle         │
//!                    └────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cep_lookup::config::loader::load_config;
use cep_lookup::config::ServiceConfig;
use cep_lookup::observability::metrics;
use cep_lookup::{HttpServer, LookupService, Shutdown};

#[derive(Parser)]
#[command(name = "cep-lookup")]
#[command(about = "CEP lookup service racing multiple address providers", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address (host:port)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cep_lookup=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("cep-lookup v0.1.0 starting");

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::standard(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstreams = config.upstreams.len(),
        deadline_ms = config.lookup.deadline_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let service = Arc::new(LookupService::new(&config)?);
    let server = HttpServer::new(&config, service);

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
