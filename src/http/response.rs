//! Response handling and transformation.
//!
//! # Responsibilities
//! - Hand the backend response to the client
//! - Map gateway-side failures to HTTP status codes
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Backend statuses (including 5xx) pass through untouched
//! - Only the hop-by-hop `Connection` header is stripped
//! - Gateway errors use the backend's JSON error shape

use axum::body::Body;
use axum::http::{header, Response as HttpResponse, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use hyper::body::Incoming;
use serde_json::json;
use thiserror::Error;

/// Failure while forwarding a request.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The computed target is not a valid URI.
    #[error("invalid target URL `{target}`: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },

    /// The backend could not be reached or the exchange failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

impl ForwardError {
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::InvalidTarget { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ForwardError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ForwardError::InvalidTarget { .. } => "Failed to build the backend request.",
            ForwardError::Upstream(_) => "Backend request failed.",
        };
        let body = json!({
            "code": status.as_u16(),
            "message": message,
            "data": {},
        });
        (status, Json(body)).into_response()
    }
}

/// Convert a backend response into a client response without buffering.
pub fn into_client_response(response: HttpResponse<Incoming>) -> Response {
    let (mut parts, body) = response.into_parts();
    parts.headers.remove(header::CONNECTION);
    Response::from_parts(parts, Body::new(body))
}

/// Response for requests outside the forwarded prefix.
pub fn not_found() -> Response {
    let body = json!({
        "code": StatusCode::NOT_FOUND.as_u16(),
        "message": "No matching route found.",
        "data": {},
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
