//! Internal block checks and failure hooks.

use async_trait::async_trait;
use thiserror::Error;

use crate::observability::metrics;

/// Why a block check failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("block reported failure: {0}")]
    Failed(String),

    #[error("block check panicked: {0}")]
    Panicked(String),
}

/// Outcome of one block check within a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCheckResult {
    pub block: String,
    pub ok: bool,
}

/// Checks the health of an internal block by name.
#[async_trait]
pub trait BlockCheck: Send + Sync {
    async fn check(&self, block: &str) -> Result<(), BlockError>;
}

/// Reports every block as operational.
///
/// Stand-in until concrete per-block checks exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationalBlockCheck;

#[async_trait]
impl BlockCheck for OperationalBlockCheck {
    async fn check(&self, block: &str) -> Result<(), BlockError> {
        tracing::debug!(block = %block, "Block is operational");
        Ok(())
    }
}

/// Hook invoked for every failed block. Recovery actions plug in here.
pub trait FailureHandler: Send + Sync {
    fn handle_block_failure(&self, block: &str, error: &BlockError);
}

/// Logs and counts failures without attempting recovery.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingFailureHandler;

impl FailureHandler for LoggingFailureHandler {
    fn handle_block_failure(&self, block: &str, error: &BlockError) {
        tracing::error!(block = %block, error = %error, "Sentinel: block needs attention");
        metrics::record_block_failure(block);
    }
}
