//! Simulated executor
//!
//! An in-memory executor whose job status is derived purely from elapsed
//! wall-clock time since submission. There is no real remote system behind
//! it. Useful for demos and tests; production deployments implement
//! [`ExecutorClient`] against a real transport and the lifecycle manager
//! never notices the difference.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::ExecutorClient;
use crate::error::{ExecutorError, Result};
use gantry_core::domain::job::{JobDescriptor, JobResult, RemoteRef};
use gantry_core::domain::phase::ExecutorStatus;

/// Elapsed-time bucket bounds for the simulated job lifecycle
///
/// A job reports QUEUED until `queued` has elapsed, SCHEDULED until
/// `scheduled`, RUNNING until `running`, and SUCCEEDED after that.
#[derive(Debug, Clone)]
pub struct SimulatedSchedule {
    pub queued: Duration,
    pub scheduled: Duration,
    pub running: Duration,
}

impl SimulatedSchedule {
    /// Schedule whose jobs succeed on the first status query
    pub fn immediate() -> Self {
        Self {
            queued: Duration::ZERO,
            scheduled: Duration::ZERO,
            running: Duration::ZERO,
        }
    }
}

impl Default for SimulatedSchedule {
    fn default() -> Self {
        Self {
            queued: Duration::from_secs(5),
            scheduled: Duration::from_secs(10),
            running: Duration::from_secs(15),
        }
    }
}

/// Status for a job that has been underway for `elapsed`
pub fn status_for_elapsed(elapsed: Duration, schedule: &SimulatedSchedule) -> ExecutorStatus {
    if elapsed < schedule.queued {
        ExecutorStatus::Queued
    } else if elapsed < schedule.scheduled {
        ExecutorStatus::Scheduled
    } else if elapsed < schedule.running {
        ExecutorStatus::Running
    } else {
        ExecutorStatus::Succeeded
    }
}

struct SimulatedJob {
    descriptor: JobDescriptor,
    started_at: DateTime<Utc>,
}

/// In-memory executor with time-driven job status
pub struct SimulatedExecutor {
    schedule: SimulatedSchedule,
    jobs: Mutex<HashMap<RemoteRef, SimulatedJob>>,
}

impl SimulatedExecutor {
    /// Creates a simulated executor with the default 5s/10s/15s buckets
    pub fn new() -> Self {
        Self::with_schedule(SimulatedSchedule::default())
    }

    /// Creates a simulated executor with custom bucket bounds
    pub fn with_schedule(schedule: SimulatedSchedule) -> Self {
        Self {
            schedule,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    fn elapsed_status(&self, job: &SimulatedJob) -> ExecutorStatus {
        let elapsed = (Utc::now() - job.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        status_for_elapsed(elapsed, &self.schedule)
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutorClient for SimulatedExecutor {
    async fn start(&self, descriptor: &JobDescriptor) -> Result<RemoteRef> {
        if !descriptor.config.is_supported() {
            return Err(ExecutorError::submission(format!(
                "unsupported config version: {}",
                descriptor.config.version
            )));
        }
        if descriptor.config.queue.is_empty() {
            return Err(ExecutorError::submission("queue must not be empty"));
        }

        let remote = RemoteRef::new(Uuid::new_v4().to_string());
        let mut jobs = self.jobs.lock().unwrap();
        jobs.insert(
            remote.clone(),
            SimulatedJob {
                descriptor: descriptor.clone(),
                started_at: Utc::now(),
            },
        );

        Ok(remote)
    }

    async fn status(&self, remote: &RemoteRef) -> Result<ExecutorStatus> {
        let jobs = self.jobs.lock().unwrap();
        let job = jobs
            .get(remote)
            .ok_or_else(|| ExecutorError::ref_not_found(remote))?;

        Ok(self.elapsed_status(job))
    }

    async fn fetch_result(&self, remote: &RemoteRef) -> Result<JobResult> {
        let jobs = self.jobs.lock().unwrap();
        let job = jobs
            .get(remote)
            .ok_or_else(|| ExecutorError::result_unavailable(format!("no such job: {remote}")))?;

        match self.elapsed_status(job) {
            ExecutorStatus::Succeeded => {
                let config = &job.descriptor.config;
                // One-row columnar echo of the submitted config.
                Ok(JobResult::new(json!({
                    "queue": [config.queue],
                    "priority": [config.priority],
                    "preemptible": [config.preemptible],
                })))
            }
            status => Err(ExecutorError::result_unavailable(format!(
                "job is {status}, not SUCCEEDED"
            ))),
        }
    }

    async fn cancel(&self, remote: &RemoteRef) -> Result<()> {
        let mut jobs = self.jobs.lock().unwrap();
        jobs.remove(remote);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::domain::job::{CONFIG_VERSION, JobConfig, JobInputs};

    fn descriptor() -> JobDescriptor {
        JobDescriptor {
            config: JobConfig {
                version: CONFIG_VERSION,
                queue: "default".to_string(),
                priority: 1,
                preemptible: true,
            },
            inputs: JobInputs {
                dataset: "events".to_string(),
                partition_count: 4,
                not_before: None,
            },
        }
    }

    #[test]
    fn test_status_buckets() {
        let schedule = SimulatedSchedule::default();
        assert_eq!(
            status_for_elapsed(Duration::from_secs(2), &schedule),
            ExecutorStatus::Queued
        );
        assert_eq!(
            status_for_elapsed(Duration::from_secs(7), &schedule),
            ExecutorStatus::Scheduled
        );
        assert_eq!(
            status_for_elapsed(Duration::from_secs(12), &schedule),
            ExecutorStatus::Running
        );
        assert_eq!(
            status_for_elapsed(Duration::from_secs(20), &schedule),
            ExecutorStatus::Succeeded
        );
    }

    #[test]
    fn test_bucket_bounds_are_exclusive() {
        let schedule = SimulatedSchedule::default();
        assert_eq!(
            status_for_elapsed(Duration::from_secs(5), &schedule),
            ExecutorStatus::Scheduled
        );
        assert_eq!(
            status_for_elapsed(Duration::from_secs(15), &schedule),
            ExecutorStatus::Succeeded
        );
    }

    #[tokio::test]
    async fn test_start_rejects_empty_queue() {
        let executor = SimulatedExecutor::new();
        let mut bad = descriptor();
        bad.config.queue.clear();

        let err = executor.start(&bad).await.unwrap_err();
        assert!(matches!(err, ExecutorError::Submission(_)));
    }

    #[tokio::test]
    async fn test_start_rejects_unsupported_version() {
        let executor = SimulatedExecutor::new();
        let mut bad = descriptor();
        bad.config.version = 99;

        let err = executor.start(&bad).await.unwrap_err();
        assert!(matches!(err, ExecutorError::Submission(_)));
    }

    #[tokio::test]
    async fn test_status_of_unknown_ref() {
        let executor = SimulatedExecutor::new();
        let err = executor
            .status(&RemoteRef::new("missing"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_result_before_success_is_unavailable() {
        let executor = SimulatedExecutor::new();
        let remote = executor.start(&descriptor()).await.unwrap();

        let err = executor.fetch_result(&remote).await.unwrap_err();
        assert!(matches!(err, ExecutorError::ResultUnavailable(_)));
    }

    #[tokio::test]
    async fn test_immediate_schedule_yields_result() {
        let executor = SimulatedExecutor::with_schedule(SimulatedSchedule::immediate());
        let remote = executor.start(&descriptor()).await.unwrap();

        assert_eq!(
            executor.status(&remote).await.unwrap(),
            ExecutorStatus::Succeeded
        );

        let result = executor.fetch_result(&remote).await.unwrap();
        assert_eq!(result.payload["queue"][0], "default");
        assert_eq!(result.payload["priority"][0], 1);
        assert_eq!(result.payload["preemptible"][0], true);
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let executor = SimulatedExecutor::new();
        let remote = executor.start(&descriptor()).await.unwrap();

        executor.cancel(&remote).await.unwrap();
        // Second cancel on a job that is already gone still succeeds.
        executor.cancel(&remote).await.unwrap();

        assert!(executor.status(&remote).await.unwrap_err().is_not_found());
    }
}
