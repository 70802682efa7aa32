//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Service table (at startup):
//!     ServiceConfig[]
//!     → registry.rs (parse base URLs, reject duplicates)
//!     → Freeze as immutable EndpointRegistry (shared via Arc)
//!
//! Per request:
//!     logical service name
//!     → EndpointRegistry::resolve
//!     → base URL or UnknownServiceError
//!     → target.rs (base + sub-path + query → Uri)
//! ```
//!
//! # Design Decisions
//! - Registry compiled at startup, immutable at runtime
//! - Deterministic: listing order is registration order

pub mod registry;
pub mod target;

pub use registry::{EndpointRegistry, RegistryError, ServiceEndpoint, UnknownServiceError};
pub use target::upstream_uri;
