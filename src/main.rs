//! Users service (v1)
//!
//! A small CRUD service over an in-memory list of users, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                  USERS SERVICE                    │
//!   Client Request    │  ┌──────────┐   ┌────────────┐   ┌────────────┐  │
//!   ──────────────────┼─▶│ listener │──▶│ middleware │──▶│  handlers  │  │
//!                     │  └──────────┘   │ id/trace/  │   └─────┬──────┘  │
//!                     │                 │ timeout/   │         │         │
//!                     │                 │ limit      │         ▼         │
//!   Client Response   │                 └────────────┘   ┌────────────┐  │
//!   ◀─────────────────┼──────────────────────────────────│ UserStore  │  │
//!                     │                                  └────────────┘  │
//!                     │   config · observability · lifecycle             │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use users_api::config::{load_config, validate_config, ConfigError, ServiceConfig};
use users_api::http::HttpServer;
use users_api::lifecycle::{signals, startup, Shutdown};
use users_api::observability::{logging, metrics};

#[derive(Debug, Parser)]
#[command(name = "users-api", version, about = "In-memory users CRUD service")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "USERS_API_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on; overrides the configuration file.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

fn resolve_config(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    let config = match args.port {
        Some(port) => config.with_port(port),
        None => config,
    };
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!("users-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.timeouts.request_secs,
        seed = config.store.seed,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = startup::bind_listener(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        trigger.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
