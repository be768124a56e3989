//! TTL Sweep Task
//!
//! Background task that periodically evicts expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheValue, LruState};

// == Sweep Handle ==
/// Owner of a running sweep task.
///
/// Dropping the handle signals the task to stop.
#[derive(Debug)]
pub(crate) struct SweepHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Spawns a sweep over `state` that runs every `interval`.
    ///
    /// The first pass happens one full interval after spawning. Each pass
    /// takes the write lock once and removes every expired entry.
    pub(crate) fn spawn<K: CacheKey, V: CacheValue>(
        state: Arc<RwLock<LruState<K, V>>>,
        interval: Duration,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(sweep_loop(state, interval, shutdown_rx));

        Self { shutdown_tx, task }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Signals the task and waits for it to exit.
    pub(crate) async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(err) = (&mut self.task).await {
            if !err.is_cancelled() {
                warn!("TTL sweep task ended abnormally: {}", err);
            }
        }
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

async fn sweep_loop<K: CacheKey, V: CacheValue>(
    state: Arc<RwLock<LruState<K, V>>>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!(
        "Starting TTL sweep task with interval of {} seconds",
        interval.as_secs()
    );

    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = {
                    let mut guard = state.write().await;
                    guard.evict_expired(Utc::now())
                };

                if removed > 0 {
                    info!("TTL sweep: removed {} expired entries", removed);
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("TTL sweep task stopped");
}
