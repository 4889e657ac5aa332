// src/tasks.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::error;

use crate::minecraft::StatusProbe;
use crate::presence::PresenceSink;

/// Handle to the repeating status-check task. Never stopped at runtime;
/// exists so tests can shut the loop down deterministically.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        self.task.abort();
    }
}

/// Spawns the repeating probe+publish cycle. The first tick fires
/// immediately; if a cycle outlives the period, the overlapping tick is
/// skipped rather than run concurrently.
pub fn spawn_status_poll_task(
    probe: Arc<dyn StatusProbe>,
    sink: Arc<dyn PresenceSink>,
    period: Duration,
) -> PollHandle {
    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let status = probe.probe().await;
            if let Err(e) = sink.publish(&status) {
                error!("Failed to publish presence: {e}");
            }
        }
    });
    PollHandle { task }
}
