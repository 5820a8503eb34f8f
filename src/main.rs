//! PocketBase Gateway
//!
//! A minimal reverse proxy that forwards `/api/*` to a PocketBase backend,
//! optionally merging `cards(collection)` into the `expand` parameter.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌────────────────────────────────────────────┐
//!                         │                 GATEWAY                     │
//!     Client Request      │  ┌─────────┐   ┌─────────┐   ┌──────────┐  │
//!     ────────────────────┼─▶│   net   │──▶│  http   │──▶│ routing  │  │
//!                         │  │listener │   │ server  │   │ + expand │  │
//!                         │  └─────────┘   └─────────┘   └────┬─────┘  │
//!                         │                                   │        │
//!     Client Response     │                ┌─────────┐        ▼        │
//!     ◀───────────────────┼────────────────│response │◀── hyper-util ◀─┼──── PocketBase
//!                         │                └─────────┘     client      │
//!                         │                                            │
//!                         │  config · observability · lifecycle        │
//!                         └────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from the environment (`POCKETBASE_URL`,
//! `GATEWAY_EXPAND_INJECTION`, `GATEWAY_CONFIG`); there are no CLI flags.

use std::process::ExitCode;

use pocketbase_gateway::config::load_from_env;
use pocketbase_gateway::lifecycle::startup;
use pocketbase_gateway::observability::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    // Logging is configured from the loaded config, so config errors go
    // straight to stderr.
    let config = match load_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = %config.forwarding.mode(),
        "pocketbase-gateway starting"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Gateway failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
