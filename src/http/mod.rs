//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, access log)
//!     → request.rs (request ID, upstream request)
//!     → [routing resolves the target URL]
//!     → hyper-util client → backend
//!     → response.rs (stream back, map gateway errors)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use response::ForwardError;
pub use server::HttpServer;
