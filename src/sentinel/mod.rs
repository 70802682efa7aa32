//! Sentinel subsystem.
//!
//! # Data Flow
//! ```text
//! start()
//!     → immediate tick
//!     → ticker every `interval_secs`
//!         → block.rs: BlockCheck::check(block) for each configured block
//!         → failures → FailureHandler::handle_block_failure(block, error)
//!         → last check timestamp updated
//! stop()
//!     → ticker aborted
//! ```
//!
//! Independent from inbound traffic; the only shared state is the supervisor's
//! own status, read through `Sentinel::status`.

pub mod block;
pub mod supervisor;

pub use block::{
    BlockCheck, BlockCheckResult, BlockError, FailureHandler, LoggingFailureHandler,
    OperationalBlockCheck,
};
pub use supervisor::{Sentinel, SentinelStatus};
