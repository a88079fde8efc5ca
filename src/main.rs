//! Translation gateway.
//!
//! A single authenticated HTTP endpoint in front of a hosted
//! machine-translation model.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ middleware: request id, trace, timeout,  │
//!                           │   body limit, CORS origin                  │
//!                           │        │                                   │
//!                           │        ▼                                   │
//!                           │   handler: preflight │ 405 │ 401 │ 400     │
//!                           │        │                                   │
//!                           │        ▼                                   │      ┌──────────────┐
//!                           │   translator (timeout) ────────────────────┼─────▶│ hosted model │
//!     Client Response       │        │                                   │◀─────┤ m2m100-1.2b  │
//!     ◀─────────────────────┼── JSON envelope {success, ...}             │      └──────────────┘
//!                           └────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use translate_gateway::config::load_config;
use translate_gateway::lifecycle::startup;
use translate_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "translate-gateway")]
#[command(about = "Authenticated HTTP front for a hosted translation model", long_about = None)]
struct Cli {
    /// TOML config file. Secrets may instead come from the environment.
    #[arg(short, long, env = "TRANSLATE_GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        model = %config.translator.model,
        upstream_timeout_secs = config.translator.timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
