//! Lifecycle manager
//!
//! Orchestrates create -> poll -> complete/fail -> cleanup for jobs running
//! on a remote executor. The manager is stateless beyond what lives on the
//! handle itself, so a crashed poller can resume from a persisted handle.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use gantry_client::{ExecutorClient, ExecutorError, Result};
use gantry_core::domain::job::{JobDescriptor, JobHandle};
use gantry_core::domain::phase::{self, JobPhase};
use gantry_core::dto::job::PollResult;

/// Host-facing job delegation interface
///
/// A workflow host integrates by holding an implementation of this trait;
/// host-specific registration mechanics live in an adapter layer outside
/// this crate.
#[async_trait]
pub trait JobAgent: Send + Sync {
    /// Submits a job for remote execution
    ///
    /// Returns as soon as the executor has accepted the job; never waits
    /// for completion. On failure no handle is produced. Submitting the
    /// same descriptor twice creates two independent remote jobs.
    async fn submit(&self, descriptor: &JobDescriptor) -> Result<JobHandle>;

    /// Observes the current phase of a submitted job
    ///
    /// Infallible: query failures are folded into the returned
    /// phase/message pair instead of propagating. The `&mut` receiver
    /// serializes polls per handle, so at most one is ever in flight.
    async fn poll(&self, handle: &mut JobHandle) -> PollResult;

    /// Frees remote resources held by a job, in any phase
    ///
    /// Never raises. Safe to call repeatedly; only the first call reaches
    /// the executor.
    async fn release(&self, handle: &mut JobHandle);
}

/// Standard lifecycle manager over an injected executor client
pub struct LifecycleManager {
    client: Arc<dyn ExecutorClient>,
}

impl LifecycleManager {
    /// Creates a manager that delegates to the given executor client
    pub fn new(client: Arc<dyn ExecutorClient>) -> Self {
        Self { client }
    }

    /// Fetches and caches the result for a handle observed successful
    ///
    /// No-op unless the phase is Succeeded with no cached result, so a
    /// handle is fetched at most once on the happy path; a failed fetch
    /// leaves the cache empty and is retried on the next poll.
    async fn fetch_result_once(
        &self,
        handle: &mut JobHandle,
    ) -> std::result::Result<(), ExecutorError> {
        if handle.phase != JobPhase::Succeeded || handle.result.is_some() {
            return Ok(());
        }

        let result = self.client.fetch_result(&handle.remote).await?;
        handle.result = Some(result);
        Ok(())
    }
}

/// Next phase after observing `observed`, given the last known `current`
///
/// Phases never move backwards in rank; Unknown is absorbing in both
/// directions.
fn advance(current: JobPhase, observed: JobPhase) -> JobPhase {
    match (current.rank(), observed.rank()) {
        (None, _) | (_, None) => JobPhase::Unknown,
        (Some(c), Some(o)) if o < c => current,
        _ => observed,
    }
}

#[async_trait]
impl JobAgent for LifecycleManager {
    async fn submit(&self, descriptor: &JobDescriptor) -> Result<JobHandle> {
        let remote = self.client.start(descriptor).await?;
        let handle = JobHandle::new(remote, Utc::now());

        info!(remote = %handle.remote, "job submitted");
        Ok(handle)
    }

    async fn poll(&self, handle: &mut JobHandle) -> PollResult {
        if handle.released {
            return PollResult {
                phase: handle.phase,
                message: "handle already released".to_string(),
                result: handle.result.clone(),
            };
        }

        // Terminal and unknown phases are settled; do not query the
        // executor for them again.
        if handle.is_terminal() || handle.phase == JobPhase::Unknown {
            let message = match self.fetch_result_once(handle).await {
                Ok(()) => format!("job already {}", handle.phase),
                Err(err) => format!("job succeeded but result fetch failed: {err}"),
            };
            return PollResult {
                phase: handle.phase,
                message,
                result: handle.result.clone(),
            };
        }

        let native = match self.client.status(&handle.remote).await {
            Ok(native) => native,
            Err(err) if err.is_not_found() => {
                warn!(remote = %handle.remote, "remote job vanished");
                handle.phase = JobPhase::Unknown;
                return PollResult {
                    phase: JobPhase::Unknown,
                    message: format!("executor no longer knows this job: {err}"),
                    result: None,
                };
            }
            Err(err) => {
                debug!(remote = %handle.remote, error = %err, "status query failed");
                return PollResult {
                    phase: handle.phase,
                    message: format!("status query failed, retaining phase {}: {err}", handle.phase),
                    result: None,
                };
            }
        };

        handle.phase = advance(handle.phase, phase::translate(&native));

        let message = match self.fetch_result_once(handle).await {
            Ok(()) => format!("executor reported status {native}"),
            Err(err) => {
                warn!(remote = %handle.remote, error = %err, "result fetch failed");
                format!("job succeeded but result fetch failed: {err}")
            }
        };

        PollResult {
            phase: handle.phase,
            message,
            result: handle.result.clone(),
        }
    }

    async fn release(&self, handle: &mut JobHandle) {
        if handle.released {
            return;
        }

        // Cleanup is best-effort; cancel failures are logged, never raised.
        if let Err(err) = self.client.cancel(&handle.remote).await {
            warn!(remote = %handle.remote, error = %err, "cancel failed during release");
        }

        handle.released = true;
        info!(remote = %handle.remote, phase = %handle.phase, "handle released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_normal_progress() {
        assert_eq!(advance(JobPhase::Pending, JobPhase::Queued), JobPhase::Queued);
        assert_eq!(advance(JobPhase::Queued, JobPhase::Running), JobPhase::Running);
        assert_eq!(
            advance(JobPhase::Running, JobPhase::Succeeded),
            JobPhase::Succeeded
        );
    }

    #[test]
    fn test_advance_never_regresses() {
        assert_eq!(advance(JobPhase::Running, JobPhase::Queued), JobPhase::Running);
        assert_eq!(
            advance(JobPhase::WaitingForResources, JobPhase::Pending),
            JobPhase::WaitingForResources
        );
    }

    #[test]
    fn test_advance_unknown_is_absorbing() {
        assert_eq!(advance(JobPhase::Unknown, JobPhase::Running), JobPhase::Unknown);
        assert_eq!(advance(JobPhase::Running, JobPhase::Unknown), JobPhase::Unknown);
    }
}
