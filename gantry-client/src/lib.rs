//! Gantry Executor Client
//!
//! Clients for the remote system that actually runs jobs.
//!
//! This crate defines the [`ExecutorClient`] capability (the four
//! operations the lifecycle manager needs from an executor) plus two
//! implementations: [`HttpExecutorClient`] for executors exposing a REST
//! surface, and [`SimulatedExecutor`], an in-memory stand-in whose job
//! status is a function of elapsed time.
//!
//! # Example
//!
//! ```no_run
//! use gantry_client::{ExecutorClient, HttpExecutorClient};
//! use gantry_core::domain::job::{JobConfig, JobDescriptor, JobInputs, CONFIG_VERSION};
//!
//! # async fn example() -> gantry_client::Result<()> {
//! let client = HttpExecutorClient::new("http://localhost:8080");
//!
//! let remote = client
//!     .start(&JobDescriptor {
//!         config: JobConfig {
//!             version: CONFIG_VERSION,
//!             queue: "default".to_string(),
//!             priority: 1,
//!             preemptible: true,
//!         },
//!         inputs: JobInputs {
//!             dataset: "events".to_string(),
//!             partition_count: 4,
//!             not_before: None,
//!         },
//!     })
//!     .await?;
//!
//! println!("Submitted job: {}", remote);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod jobs;
mod simulated;

// Re-export commonly used types
pub use error::{ExecutorError, Result};
pub use simulated::{SimulatedExecutor, SimulatedSchedule, status_for_elapsed};

use async_trait::async_trait;
use reqwest::Client;

use gantry_core::domain::job::{JobDescriptor, JobResult, RemoteRef};
use gantry_core::domain::phase::ExecutorStatus;

/// Capability contract for a remote job executor
///
/// A real deployment implements this against whatever transport the
/// executor exposes; the lifecycle manager only ever sees this trait.
#[async_trait]
pub trait ExecutorClient: Send + Sync {
    /// Begins remote execution of the described job
    ///
    /// Allocates remote resources. Fails with
    /// [`ExecutorError::Submission`] when the executor rejects the
    /// descriptor.
    async fn start(&self, descriptor: &JobDescriptor) -> Result<RemoteRef>;

    /// Queries the current native status of a remote job
    async fn status(&self, remote: &RemoteRef) -> Result<ExecutorStatus>;

    /// Fetches the result of a job the executor has reported successful
    ///
    /// Valid only after [`ExecutorClient::status`] indicated success;
    /// fails with [`ExecutorError::ResultUnavailable`] otherwise.
    async fn fetch_result(&self, remote: &RemoteRef) -> Result<JobResult>;

    /// Cancels a remote job and frees its resources
    ///
    /// Idempotent: succeeds even if the job is already terminal or the
    /// ref no longer exists.
    async fn cancel(&self, remote: &RemoteRef) -> Result<()>;
}

/// HTTP client for executors exposing a REST job API
#[derive(Debug, Clone)]
pub struct HttpExecutorClient {
    /// Base URL of the executor (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HttpExecutorClient {
    /// Create a new executor client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the executor API (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new executor client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the executor
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the body of a failed response for error reporting
    async fn error_body(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string())
    }
}
