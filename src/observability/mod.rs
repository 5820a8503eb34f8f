//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stderr (text or JSON lines)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - One access-log line per request from the trace layer

pub mod logging;

pub use logging::init_logging;
