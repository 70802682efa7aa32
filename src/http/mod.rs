//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → server.rs (request ID, tracing, CORS, timeout)
//!     → security::access_control (credential presence)
//!     → handler
//!         /health         → health::HealthProber
//!         /api/...        → forward.rs (registry lookup, upstream call)
//!                            → request.rs (forwardable headers)
//!                            → response.rs (streamed relay, stream headers)
//!     → Send to client
//! ```

pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use forward::Forwarder;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
