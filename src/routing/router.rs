//! Target URL resolution.
//!
//! # Responsibilities
//! - Decide whether a request path is forwarded at all
//! - Build the target URL from the backend base URL and the request URI
//! - Apply the `expand` rewrite in expand-injecting mode
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - The target path always equals the inbound path; only the query changes
//! - Explicit `None` for unmatched paths rather than a silent default

use axum::http::Uri;

use crate::config::{ForwardMode, GatewayConfig};
use crate::routing::expand::{merge_expand, CARDS_COLLECTION};
use crate::routing::matcher::PathPrefixMatcher;

/// Maps inbound request URIs to backend target URLs.
#[derive(Debug, Clone)]
pub struct Router {
    matcher: PathPrefixMatcher,
    backend_url: String,
    mode: ForwardMode,
}

impl Router {
    /// Create a router forwarding `prefix` to `backend_url`.
    pub fn new(
        prefix: impl Into<String>,
        backend_url: impl Into<String>,
        mode: ForwardMode,
    ) -> Self {
        Self {
            matcher: PathPrefixMatcher::new(prefix),
            backend_url: backend_url.into(),
            mode,
        }
    }

    /// Create a router from a loaded configuration.
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.forwarding.path_prefix.clone(),
            config.backend.url.clone(),
            config.forwarding.mode(),
        )
    }

    pub fn mode(&self) -> ForwardMode {
        self.mode
    }

    /// Target URL for `uri`, or `None` when its path is not forwarded.
    pub fn resolve(&self, uri: &Uri) -> Option<String> {
        let path = uri.path();
        if !self.matcher.matches(path) {
            return None;
        }

        let target = match (self.mode, uri.query()) {
            (ForwardMode::ExpandInjecting, query) => format!(
                "{}{}?{}",
                self.backend_url,
                path,
                merge_expand(query.unwrap_or(""), CARDS_COLLECTION)
            ),
            (ForwardMode::PassThrough, Some(query)) => {
                format!("{}{}?{}", self.backend_url, path, query)
            }
            (ForwardMode::PassThrough, None) => format!("{}{}", self.backend_url, path),
        };
        Some(target)
    }
}
