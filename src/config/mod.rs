//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → GATEWAY_CONFIG file (optional TOML, loader.rs)
//!     → environment overrides (POCKETBASE_URL, GATEWAY_EXPAND_INJECTION)
//!     → backend URL resolved for the forwarding mode
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with the request handler
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Environment lookup is injectable so tests never touch process state

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    BackendConfig, ForwardMode, ForwardingConfig, GatewayConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, DEFAULT_BACKEND_URL,
};
pub use validation::ValidationError;
