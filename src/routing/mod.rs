//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → matcher.rs (path prefix check)
//!     → router.rs (target URL = backend base + path + query)
//!     → expand.rs (expand merge, expand-injecting mode only)
//!     → Return: target URL or NoMatch
//! ```
//!
//! # Design Decisions
//! - Router built at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always yields the same target URL
//! - Target URLs are recomputed per request, never cached

pub mod expand;
pub mod matcher;
pub mod router;

pub use expand::{merge_expand, CARDS_COLLECTION};
pub use matcher::PathPrefixMatcher;
pub use router::Router;
