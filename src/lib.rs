//! Front door for the curator, monetizer, public delivery and gateway services.
//!
//! Proxies browser requests to the right backend, aggregates backend liveness
//! into a single health signal, and runs the sentinel self-check loop.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod security;
pub mod sentinel;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::EndpointRegistry;
pub use sentinel::Sentinel;
