//! Request handling and transformation.
//!
//! # Responsibilities
//! - Attach a request ID (inbound `x-request-id` or UUID v4) for tracing
//! - Prepare request for forwarding to backend
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The ID lives in request extensions only; forwarded headers are untouched
//! - The body is streamed to the backend, never buffered

use std::fmt;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, Uri};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying a caller-supplied request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Identifier used to correlate log lines for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh UUID v4 request ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access to the [`RequestId`] stored by [`RequestIdLayer`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&RequestId> {
        self.extensions().get::<RequestId>()
    }
}

/// Layer that stores a [`RequestId`] in every request's extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| RequestId(v.to_string()))
            .unwrap_or_else(RequestId::generate);
        req.extensions_mut().insert(id);
        self.inner.call(req)
    }
}

/// Rebuild an inbound request so it targets `target`.
///
/// Method, headers and the body stream carry over unchanged, except for the
/// hop-by-hop `Connection` header and `Host`, which names the target's
/// authority. The HTTP version is left to the client.
pub fn build_upstream_request(request: Request<Body>, target: Uri) -> Request<Body> {
    let (parts, body) = request.into_parts();

    let mut upstream = Request::new(body);
    *upstream.method_mut() = parts.method;
    *upstream.uri_mut() = target;
    *upstream.headers_mut() = parts.headers;
    upstream.headers_mut().remove(header::CONNECTION);

    let host = upstream
        .uri()
        .authority()
        .and_then(|authority| HeaderValue::from_str(authority.as_str()).ok());
    match host {
        Some(host) => {
            upstream.headers_mut().insert(header::HOST, host);
        }
        None => {
            upstream.headers_mut().remove(header::HOST);
        }
    }
    upstream
}
