//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → prober.rs: one task per registered service, each with its own timeout
//!     → join all outcomes (network error / non-2xx / timeout = false)
//!     → report.rs: HealthReport { status, services }
//!     → serialized to the caller, then discarded
//! ```
//!
//! # Design Decisions
//! - Probes run concurrently; latency is the slowest probe, not the sum
//! - No retries and no caching within a probe call
//! - Individual failures never abort the probe

pub mod prober;
pub mod report;

pub use prober::HealthProber;
pub use report::{AggregateStatus, HealthReport};
