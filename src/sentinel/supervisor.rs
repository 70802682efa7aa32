//! Sentinel supervisor: periodic self-check of internal blocks.
//!
//! # States
//! ```text
//! Inactive --start()--> Active    (spawns the ticker, runs one tick immediately)
//! Active   --stop()---> Inactive  (aborts the ticker)
//! ```
//!
//! `start()` while Active and `stop()` while Inactive are no-ops, so at most
//! one ticker exists per supervisor.
//!
//! # Design Decisions
//! - State transitions and tick bookkeeping share one mutex, never held across `.await`
//! - Each activation gets an epoch; a tick from an earlier activation cannot
//!   update state after `stop()`
//! - A failing or panicking block check is isolated to that block

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use futures_util::FutureExt;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::SentinelConfig;
use crate::observability::metrics;
use crate::sentinel::block::{
    BlockCheck, BlockCheckResult, BlockError, FailureHandler, LoggingFailureHandler,
    OperationalBlockCheck,
};

/// Snapshot returned by [`Sentinel::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentinelStatus {
    pub active: bool,
    /// Completion time of the last tick, if any.
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct SentinelState {
    active: bool,
    last_check: Option<DateTime<Utc>>,
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

struct SentinelInner {
    blocks: Vec<String>,
    interval: Duration,
    checker: Arc<dyn BlockCheck>,
    on_failure: Arc<dyn FailureHandler>,
    state: Mutex<SentinelState>,
    ticks: AtomicU64,
}

/// Handle to the supervisor. Clones share the same state and ticker.
#[derive(Clone)]
pub struct Sentinel {
    inner: Arc<SentinelInner>,
}

impl Sentinel {
    /// Supervisor with the default checks and the logging failure hook.
    pub fn new(config: &SentinelConfig) -> Self {
        Self::with_hooks(
            config,
            Arc::new(OperationalBlockCheck),
            Arc::new(LoggingFailureHandler),
        )
    }

    pub fn with_hooks(
        config: &SentinelConfig,
        checker: Arc<dyn BlockCheck>,
        on_failure: Arc<dyn FailureHandler>,
    ) -> Self {
        Self {
            inner: Arc::new(SentinelInner {
                blocks: config.blocks.clone(),
                interval: Duration::from_secs(config.interval_secs),
                checker,
                on_failure,
                state: Mutex::new(SentinelState::default()),
                ticks: AtomicU64::new(0),
            }),
        }
    }

    /// Activate the supervisor and run the first tick before returning.
    pub async fn start(&self) {
        let epoch = {
            let mut state = self.inner.lock_state();
            if state.active {
                tracing::info!("Sentinel is already active");
                return;
            }
            state.active = true;
            state.epoch += 1;
            let epoch = state.epoch;
            state.task = Some(tokio::spawn(run_loop(self.inner.clone(), epoch)));
            epoch
        };

        tracing::info!(
            interval_secs = self.inner.interval.as_secs(),
            blocks = ?self.inner.blocks,
            "Sentinel activated"
        );
        self.inner.tick(epoch).await;
    }

    /// Deactivate the supervisor and cancel its ticker.
    pub fn stop(&self) {
        let mut state = self.inner.lock_state();
        if !state.active {
            tracing::debug!("Sentinel is not active");
            return;
        }
        state.active = false;
        if let Some(task) = state.task.take() {
            task.abort();
        }
        drop(state);

        tracing::info!("Sentinel deactivated");
    }

    pub fn status(&self) -> SentinelStatus {
        let state = self.inner.lock_state();
        SentinelStatus {
            active: state.active,
            timestamp: state.last_check,
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock_state().active
    }

    /// Number of ticks completed while active.
    pub fn tick_count(&self) -> u64 {
        self.inner.ticks.load(Ordering::SeqCst)
    }
}

impl SentinelInner {
    fn lock_state(&self) -> MutexGuard<'_, SentinelState> {
        self.state.lock().expect("sentinel state mutex poisoned")
    }

    async fn tick(&self, epoch: u64) -> Vec<BlockCheckResult> {
        tracing::debug!("Sentinel: performing health check");

        let checks = self.blocks.iter().map(|block| async move {
            let outcome = match AssertUnwindSafe(self.checker.check(block)).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(payload) => Err(BlockError::Panicked(panic_message(payload.as_ref()))),
            };
            (block, outcome)
        });

        let mut results = Vec::with_capacity(self.blocks.len());
        for (block, outcome) in join_all(checks).await {
            if let Err(error) = &outcome {
                let handled = std::panic::catch_unwind(AssertUnwindSafe(|| {
                    self.on_failure.handle_block_failure(block, error)
                }));
                if handled.is_err() {
                    tracing::error!(block = %block, "Sentinel: failure handler panicked");
                }
            }
            results.push(BlockCheckResult {
                block: block.clone(),
                ok: outcome.is_ok(),
            });
        }

        let mut state = self.lock_state();
        if state.active && state.epoch == epoch {
            state.last_check = Some(Utc::now());
            self.ticks.fetch_add(1, Ordering::SeqCst);
            metrics::record_sentinel_tick();
        }

        results
    }
}

async fn run_loop(inner: Arc<SentinelInner>, epoch: u64) {
    let mut ticker = time::interval_at(Instant::now() + inner.interval, inner.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let results = inner.tick(epoch).await;
        let failed = results.iter().filter(|r| !r.ok).count();
        if failed > 0 {
            tracing::warn!(failed, total = results.len(), "Sentinel tick finished with failures");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
