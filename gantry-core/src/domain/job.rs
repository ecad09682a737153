//! Job domain types
//!
//! Structures shared between the lifecycle manager (which owns handles) and
//! executor clients (which speak to the remote system).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::phase::JobPhase;

/// Current descriptor config schema version.
pub const CONFIG_VERSION: u32 = 1;

fn default_config_version() -> u32 {
    CONFIG_VERSION
}

/// Job configuration
///
/// Explicit, versioned schema: unknown fields are rejected at
/// deserialization instead of being silently stringified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    /// Executor queue the job is submitted to
    pub queue: String,
    /// Scheduling priority, higher wins
    pub priority: i64,
    /// Whether the executor may evict the job under resource pressure
    pub preemptible: bool,
}

impl JobConfig {
    pub fn is_supported(&self) -> bool {
        self.version == CONFIG_VERSION
    }
}

/// Typed input parameters for a job run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobInputs {
    /// Dataset the job operates on
    pub dataset: String,
    /// Number of partitions to process
    pub partition_count: i64,
    /// Earliest time the executor should start the job
    pub not_before: Option<DateTime<Utc>>,
}

/// Immutable description of a job to run
///
/// A descriptor has no identity until submitted; submitting the same
/// descriptor twice creates two independent remote jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobDescriptor {
    pub config: JobConfig,
    pub inputs: JobInputs,
}

/// Opaque executor-issued job identifier
///
/// The executor owns this value; callers only store and echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteRef(String);

impl RemoteRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-held record correlating a logical job to its remote execution
///
/// Serializable so the host can persist it between polls and across
/// process restarts. The remote ref plus submission time is everything
/// needed to resume polling; the descriptor itself is not carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobHandle {
    pub remote: RemoteRef,
    pub submitted_at: DateTime<Utc>,
    /// Last phase observed by a poll
    pub phase: JobPhase,
    /// Result cached on the first poll that observed success
    pub result: Option<JobResult>,
    /// Set once remote resources have been released
    pub released: bool,
}

impl JobHandle {
    /// Creates a handle for a freshly submitted job
    pub fn new(remote: RemoteRef, submitted_at: DateTime<Utc>) -> Self {
        Self {
            remote,
            submitted_at,
            phase: JobPhase::Pending,
            result: None,
            released: false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Serializes the handle to an opaque byte form for host persistence
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Reconstructs a handle from bytes produced by [`JobHandle::encode`]
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Result payload of a successful job
///
/// Opaque to the core: constructed by the executor client and handed back
/// to the host, never inspected in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub payload: serde_json::Value,
}

impl JobResult {
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }

    /// Zero-value result, used where a job has not (or not successfully) completed
    pub fn empty() -> Self {
        Self {
            payload: serde_json::Value::Null,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_null()
    }
}
