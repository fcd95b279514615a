//! Interval scheduler around [`CycleRunner`].
//!
//! Runs one cycle immediately, then one per interval tick while armed. The
//! shutdown future disarms it: the timer is dropped and an in-flight cycle is
//! abandoned at its current await point, without persisting watermarks.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::CycleRunner;

/// Drives [`CycleRunner::run_cycle`] on a fixed interval.
pub struct Scheduler {
    runner: CycleRunner,
    interval: Duration,
}

impl Scheduler {
    pub fn new(runner: CycleRunner, interval: Duration) -> Self {
        Self { runner, interval }
    }

    /// Runs cycles until `shutdown` completes.
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            repositories = self.runner.repositories().len(),
            "scheduler armed"
        );
        tokio::select! {
            _ = self.run_forever() => {}
            _ = shutdown => {
                info!("shutdown requested; poll timer cancelled");
            }
        }
    }

    async fn run_forever(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        // A cycle that overruns the interval pushes the next one back rather
        // than triggering a burst of catch-up cycles.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            // The first tick completes immediately.
            ticker.tick().await;
            self.runner.run_cycle().await;
        }
    }
}
