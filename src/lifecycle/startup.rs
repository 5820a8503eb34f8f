//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind the listener from an already validated configuration
//! - Announce the listening port and the configured backend
//! - Serve until a termination signal arrives
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Configuration is loaded before this point, so a missing backend URL
//!   never reaches the bind step

use thiserror::Error;

use crate::config::GatewayConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::{self, ListenerError};

/// Fatal error after configuration has been accepted.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind, serve and wait for a termination signal.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    let listener = net::bind(&config.listener).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(port = local_addr.port(), "Gateway is running on port {}", local_addr.port());
    tracing::info!(
        backend = %config.backend.url,
        prefix = %config.forwarding.path_prefix,
        mode = %config.forwarding.mode(),
        "Requests to {}/* will be forwarded to the backend at {}",
        config.forwarding.path_prefix,
        config.backend.url
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;
    Ok(())
}
