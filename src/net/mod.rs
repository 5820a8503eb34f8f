//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Configured bind address
//!     → listener.rs (bind, fatal on failure)
//!     → Hand off to HTTP layer (axum accept loop)
//! ```
//!
//! # Design Decisions
//! - No connection limits beyond what the HTTP runtime provides
//! - TLS is not terminated here

pub mod listener;

pub use listener::{bind, ListenerError};
