//! Job DTOs for executor and host communication

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobDescriptor, JobResult, RemoteRef};
use crate::domain::phase::JobPhase;

/// Request to start a job on the remote executor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobRequest {
    pub descriptor: JobDescriptor,
}

/// Executor acknowledgement of a submitted job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    pub remote: RemoteRef,
}

/// Raw status report from the remote executor
///
/// The status code is carried as the executor emitted it; parsing into
/// [`crate::domain::phase::ExecutorStatus`] happens client-side so that
/// unrecognized codes survive the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Outcome of a single poll, handed back to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollResult {
    pub phase: JobPhase,
    pub message: String,
    /// Present only once the job has succeeded
    pub result: Option<JobResult>,
}
