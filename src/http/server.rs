//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all forwarding handler
//! - Wire up middleware (request ID, access log)
//! - Bind server to listener
//! - Resolve the target URL for each request
//! - Forward requests to the backend and stream responses back

use axum::{
    body::Body,
    extract::State,
    http::{Request, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{ForwardMode, GatewayConfig};
use crate::http::request::{build_upstream_request, RequestIdExt, RequestIdLayer};
use crate::http::response::{into_client_response, not_found, ForwardError};
use crate::routing::Router as ProxyRouter;

/// Client used to reach the backend.
pub type BackendClient = Client<HttpConnector, Body>;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub client: BackendClient,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let proxy_router = Arc::new(ProxyRouter::from_config(&config));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            router: proxy_router,
            client,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .request_id()
                            .map(ToString::to_string)
                            .unwrap_or_default();
                        tracing::info_span!(
                            "request",
                            request_id = %request_id,
                            method = %request.method(),
                            uri = %request.uri()
                        )
                    })
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(RequestIdLayer)
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = %self.config.forwarding.mode(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
/// Resolves the target URL and forwards the request.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .request_id()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown".to_string());

    let Some(target) = state.router.resolve(request.uri()) else {
        tracing::warn!(
            request_id = %request_id,
            path = %request.uri().path(),
            "No route matched"
        );
        return not_found();
    };

    match state.router.mode() {
        ForwardMode::ExpandInjecting => {
            tracing::info!(request_id = %request_id, target_url = %target, "Forwarding request")
        }
        ForwardMode::PassThrough => {
            tracing::debug!(request_id = %request_id, target_url = %target, "Forwarding request")
        }
    }

    match forward(&state.client, request, target).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            e.into_response()
        }
    }
}

async fn forward(
    client: &BackendClient,
    request: Request<Body>,
    target: String,
) -> Result<Response, ForwardError> {
    let uri = target
        .parse::<Uri>()
        .map_err(|source| ForwardError::InvalidTarget { target, source })?;

    let response = client.request(build_upstream_request(request, uri)).await?;
    Ok(into_client_response(response))
}
