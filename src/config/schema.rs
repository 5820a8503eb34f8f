//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::Deserialize;

/// Backend used when expand injection is on and no URL is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8090";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend the gateway forwards to.
    pub backend: BackendConfig,

    /// Which requests are forwarded and how their query is rewritten.
    pub forwarding: ForwardingConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8081").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
        }
    }
}

/// Backend server configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend base URL (e.g., "http://127.0.0.1:8090").
    ///
    /// Empty means "not configured"; the loader resolves it before the
    /// config is handed to the server.
    pub url: String,
}

/// Forwarding behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Merge `cards(collection)` into the `expand` query parameter.
    pub expand_injection: bool,

    /// Path prefix that is forwarded to the backend.
    pub path_prefix: String,
}

impl ForwardingConfig {
    /// The forwarding mode selected by `expand_injection`.
    pub fn mode(&self) -> ForwardMode {
        if self.expand_injection {
            ForwardMode::ExpandInjecting
        } else {
            ForwardMode::PassThrough
        }
    }
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            expand_injection: true,
            path_prefix: "/api".to_string(),
        }
    }
}

/// How a matched request's query string is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMode {
    /// Guarantee the required expansion in the `expand` parameter.
    ExpandInjecting,
    /// Forward the query untouched.
    PassThrough,
}

impl std::fmt::Display for ForwardMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForwardMode::ExpandInjecting => write!(f, "expand-injecting"),
            ForwardMode::PassThrough => write!(f, "pass-through"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format for log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gateway_contract() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
        assert_eq!(config.forwarding.path_prefix, "/api");
        assert_eq!(config.forwarding.mode(), ForwardMode::ExpandInjecting);
        assert!(config.backend.url.is_empty());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [forwarding]
            expand_injection = false

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.forwarding.mode(), ForwardMode::PassThrough);
        assert_eq!(config.forwarding.path_prefix, "/api");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
    }
}
