//! Error types for executor clients

use gantry_core::domain::job::RemoteRef;
use thiserror::Error;

/// Result type alias for executor client operations
pub type Result<T> = std::result::Result<T, ExecutorError>;

/// Errors that can occur while talking to a remote executor
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The executor rejected the job at submission time (bad config, quota
    /// exceeded). Not retryable; no handle exists for the attempt.
    #[error("job submission rejected: {0}")]
    Submission(String),

    /// A query failed for a reason expected to clear up (network blip,
    /// executor overload). The caller should back off and poll again.
    #[error("transient executor query failure: {0}")]
    TransientQuery(String),

    /// The remote job reference is expired or invalid. Not retryable.
    #[error("remote job not found: {0}")]
    RefNotFound(String),

    /// A result was requested before the executor reported success.
    #[error("job result not available: {0}")]
    ResultUnavailable(String),
}

impl ExecutorError {
    /// Create a submission error
    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission(message.into())
    }

    /// Create a transient query error
    pub fn transient_query(message: impl Into<String>) -> Self {
        Self::TransientQuery(message.into())
    }

    /// Create a not-found error for a remote ref
    pub fn ref_not_found(remote: &RemoteRef) -> Self {
        Self::RefNotFound(remote.to_string())
    }

    /// Create a result-unavailable error
    pub fn result_unavailable(message: impl Into<String>) -> Self {
        Self::ResultUnavailable(message.into())
    }

    /// Check if the caller should back off and retry the same query
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientQuery(_))
    }

    /// Check if this error means the remote job no longer exists
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RefNotFound(_))
    }
}
