//! Canonical phases and the status translator
//!
//! `JobPhase` is the small, stable vocabulary a caller observes.
//! `ExecutorStatus` is whatever the remote system reports. The translation
//! between them is total: every native status maps to some phase, never an
//! error.

use serde::{Deserialize, Serialize};

/// Canonical caller-facing job phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobPhase {
    Pending,
    Queued,
    WaitingForResources,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl JobPhase {
    /// True for phases no further poll can leave
    pub fn is_terminal(self) -> bool {
        matches!(self, JobPhase::Succeeded | JobPhase::Failed)
    }

    /// Position in the progress order Pending < Queued < WaitingForResources
    /// < Running < terminal. Unknown sits outside the order and is absorbing.
    pub fn rank(self) -> Option<u8> {
        match self {
            JobPhase::Pending => Some(0),
            JobPhase::Queued => Some(1),
            JobPhase::WaitingForResources => Some(2),
            JobPhase::Running => Some(3),
            JobPhase::Succeeded | JobPhase::Failed => Some(4),
            JobPhase::Unknown => None,
        }
    }
}

impl std::fmt::Display for JobPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobPhase::Pending => "PENDING",
            JobPhase::Queued => "QUEUED",
            JobPhase::WaitingForResources => "WAITING_FOR_RESOURCES",
            JobPhase::Running => "RUNNING",
            JobPhase::Succeeded => "SUCCEEDED",
            JobPhase::Failed => "FAILED",
            JobPhase::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Executor-native status vocabulary
///
/// Executors report upper-case status codes on the wire; codes this crate
/// does not recognize are preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutorStatus {
    Pending,
    Queued,
    Scheduled,
    Running,
    Succeeded,
    Failed,
    Other(String),
}

impl ExecutorStatus {
    /// Parses a wire status code. Total: unrecognized codes become `Other`.
    pub fn parse(code: &str) -> Self {
        match code {
            "PENDING" => ExecutorStatus::Pending,
            "QUEUED" => ExecutorStatus::Queued,
            "SCHEDULED" => ExecutorStatus::Scheduled,
            "RUNNING" => ExecutorStatus::Running,
            "SUCCEEDED" => ExecutorStatus::Succeeded,
            "FAILED" => ExecutorStatus::Failed,
            other => ExecutorStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ExecutorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutorStatus::Pending => f.write_str("PENDING"),
            ExecutorStatus::Queued => f.write_str("QUEUED"),
            ExecutorStatus::Scheduled => f.write_str("SCHEDULED"),
            ExecutorStatus::Running => f.write_str("RUNNING"),
            ExecutorStatus::Succeeded => f.write_str("SUCCEEDED"),
            ExecutorStatus::Failed => f.write_str("FAILED"),
            ExecutorStatus::Other(code) => f.write_str(code),
        }
    }
}

/// Maps a native executor status to the canonical phase
///
/// SCHEDULED means the executor has accepted the job but is still holding
/// it for resources, hence WaitingForResources.
pub fn translate(status: &ExecutorStatus) -> JobPhase {
    match status {
        ExecutorStatus::Pending => JobPhase::Pending,
        ExecutorStatus::Queued => JobPhase::Queued,
        ExecutorStatus::Scheduled => JobPhase::WaitingForResources,
        ExecutorStatus::Running => JobPhase::Running,
        ExecutorStatus::Succeeded => JobPhase::Succeeded,
        ExecutorStatus::Failed => JobPhase::Failed,
        ExecutorStatus::Other(_) => JobPhase::Unknown,
    }
}
