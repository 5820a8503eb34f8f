//! Configuration loading from the environment and an optional file.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{ForwardMode, GatewayConfig, DEFAULT_BACKEND_URL};
use crate::config::validation::{validate_config, ValidationError};

/// Backend base URL.
pub const ENV_BACKEND_URL: &str = "POCKETBASE_URL";
/// `on`/`off` switch for expand injection.
pub const ENV_EXPAND_INJECTION: &str = "GATEWAY_EXPAND_INJECTION";
/// Path to an optional TOML config file.
pub const ENV_CONFIG_PATH: &str = "GATEWAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("POCKETBASE_URL environment variable is not set")]
    MissingBackendUrl,

    #[error("{var} must be on or off, got `{value}`")]
    InvalidSwitch { var: &'static str, value: String },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file. Validation happens in [`load_config`].
pub fn load_config_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    load_config(|key| std::env::var(key).ok())
}

/// Build the gateway configuration from an environment lookup.
///
/// Defaults are overlaid by the file named in `GATEWAY_CONFIG` (if any),
/// then by environment variables. The backend URL is resolved according to
/// the forwarding mode: pass-through requires one, expand injection falls
/// back to [`DEFAULT_BACKEND_URL`]. Empty variables count as unset.
pub fn load_config<F>(lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| lookup(key).filter(|value| !value.is_empty());

    let mut config = match env(ENV_CONFIG_PATH) {
        Some(path) => load_config_file(Path::new(&path))?,
        None => GatewayConfig::default(),
    };

    if let Some(value) = env(ENV_EXPAND_INJECTION) {
        config.forwarding.expand_injection = parse_switch(ENV_EXPAND_INJECTION, &value)?;
    }

    let backend_url = env(ENV_BACKEND_URL)
        .or_else(|| Some(config.backend.url.clone()).filter(|url| !url.is_empty()));

    config.backend.url = match (backend_url, config.forwarding.mode()) {
        (Some(url), _) => url,
        (None, ForwardMode::ExpandInjecting) => DEFAULT_BACKEND_URL.to_string(),
        (None, ForwardMode::PassThrough) => return Err(ConfigError::MissingBackendUrl),
    };
    // Request paths always start with `/`.
    let trimmed = config.backend.url.trim_end_matches('/').len();
    config.backend.url.truncate(trimmed);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_switch(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidSwitch {
            var,
            value: value.to_string(),
        }),
    }
}
