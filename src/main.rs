//! BFF proxy (v1)
//!
//! A backend-for-frontend built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                    BFF PROXY                     │
//!                        │                                                  │
//!     Browser Request    │  ┌─────────┐   ┌───────────┐   ┌─────────────┐   │
//!     ───────────────────┼─▶│  http   │──▶│  routes   │──▶│  validator  │   │
//!                        │  │ server  │   │ (handler) │   │ (rule sets) │   │
//!                        │  └─────────┘   └─────┬─────┘   └─────────────┘   │
//!                        │                      │                           │
//!                        │                      ▼                           │
//!                        │               ┌─────────────┐                    │
//!                        │               │  upstream   │  + static          │
//!                        │               │ RequestSpec │    credentials     │
//!                        │               └──────┬──────┘                    │
//!                        │                      │                           │
//!                        │                      ▼                           │
//!     Browser Response   │  ┌─────────┐   ┌─────────────┐                   │
//!     ◀──────────────────┼──│response │◀──│  Forwarder  │◀──────────────────┼── Upstream
//!                        │  │ shaper  │   │  (reqwest)  │                   │   Service
//!                        │  └─────────┘   └─────────────┘                   │
//!                        │                                                  │
//!                        │  Cross-cutting: config, observability,           │
//!                        │  security limits, lifecycle                      │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use bff_proxy::config::loader::{finalize, read_config};
use bff_proxy::config::BffConfig;
use bff_proxy::lifecycle::startup;
use bff_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "bff-proxy")]
#[command(about = "Backend-for-frontend proxy with static upstream credentials", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => BffConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("bff-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let config = finalize(config)?;

    startup::run(config).await
}
