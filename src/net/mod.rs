//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarder / HealthProber
//!     → client.rs (pooled hyper client, bounded connect)
//!     → Backend service over plain HTTP
//! ```
//!
//! # Design Decisions
//! - One client per component; connections are pooled per host
//! - Connect timeout is set on the connector, response deadlines by callers

pub mod client;

pub use client::{build_client, UpstreamClient};
