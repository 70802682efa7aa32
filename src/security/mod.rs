//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → access_control.rs (middleware)
//!     → policy.rs: does this path require a credential?
//!     → yes + no bearer token → 401 Unauthenticated
//!     → otherwise → handler
//! ```
//!
//! # Design Decisions
//! - Presence check only; the backend validates the token
//! - Development mode bypasses the check for every path

pub mod access_control;
pub mod policy;

pub use access_control::access_control_middleware;
pub use policy::AccessPolicy;
