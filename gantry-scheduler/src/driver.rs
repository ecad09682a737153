//! Poll driver
//!
//! Drives a single handle to a settled phase on a fixed cadence and then
//! releases it. The lifecycle manager holds no timers of its own; this
//! loop is the external scheduler it expects to be driven by.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{debug, info, warn};

use gantry_agent::{HandleStore, JobAgent, LifecycleManager};
use gantry_core::domain::job::JobHandle;
use gantry_core::domain::phase::JobPhase;

/// Polls handles against a shared lifecycle manager
pub struct PollDriver {
    manager: Arc<LifecycleManager>,
    interval: Duration,
}

impl PollDriver {
    /// Creates a driver polling on the given cadence
    pub fn new(manager: Arc<LifecycleManager>, interval: Duration) -> Self {
        Self { manager, interval }
    }

    /// Polls the handle until it settles, releases it, and returns the
    /// final phase
    ///
    /// The handle is persisted after every poll so a restarted scheduler
    /// resumes from the last observed phase, and removed from the store
    /// once released.
    pub async fn drive(&self, handle: &mut JobHandle, store: &HandleStore) -> JobPhase {
        let mut ticker = time::interval(self.interval);

        loop {
            ticker.tick().await;

            let outcome = self.manager.poll(handle).await;
            debug!(remote = %handle.remote, phase = %outcome.phase, "{}", outcome.message);

            if let Err(e) = store.save(handle) {
                warn!(remote = %handle.remote, "failed to persist handle: {e:#}");
            }

            if outcome.phase.is_terminal() || outcome.phase == JobPhase::Unknown {
                info!(
                    remote = %handle.remote,
                    phase = %outcome.phase,
                    has_result = outcome.result.is_some(),
                    "job settled"
                );
                break;
            }
        }

        self.manager.release(handle).await;

        if let Err(e) = store.remove(&handle.remote) {
            warn!(remote = %handle.remote, "failed to drop persisted handle: {e:#}");
        }

        handle.phase
    }
}
