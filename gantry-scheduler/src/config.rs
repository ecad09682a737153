//! Scheduler configuration
//!
//! Defines all configurable parameters for the polling scheduler including
//! poll cadence, executor selection, and handle persistence location.

use std::path::PathBuf;
use std::time::Duration;

/// Scheduler configuration
///
/// All intervals are configurable to allow tuning for different
/// deployment scenarios (dev vs prod, fast vs slow executors).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of a real executor; None selects the simulated executor
    pub executor_url: Option<String>,

    /// How often each in-flight job is polled
    pub poll_interval: Duration,

    /// Max jobs polled concurrently
    pub max_parallel_jobs: usize,

    /// Directory where handles are persisted between runs
    pub state_dir: PathBuf,
}

impl Config {
    /// Creates a configuration with defaults
    pub fn new() -> Self {
        Self {
            executor_url: None,
            poll_interval: Duration::from_secs(2),
            max_parallel_jobs: 2,
            state_dir: PathBuf::from("gantry-state"),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables:
    /// - EXECUTOR_URL (optional, default: simulated executor)
    /// - POLL_INTERVAL (optional, seconds, default: 2)
    /// - MAX_PARALLEL_JOBS (optional, default: 2)
    /// - STATE_DIR (optional, default: gantry-state)
    pub fn from_env() -> Self {
        let mut config = Self::new();

        config.executor_url = std::env::var("EXECUTOR_URL").ok().filter(|s| !s.is_empty());

        if let Some(secs) = std::env::var("POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.poll_interval = Duration::from_secs(secs);
        }

        if let Some(n) = std::env::var("MAX_PARALLEL_JOBS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        {
            config.max_parallel_jobs = n;
        }

        if let Ok(dir) = std::env::var("STATE_DIR") {
            config.state_dir = PathBuf::from(dir);
        }

        config
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_parallel_jobs == 0 {
            anyhow::bail!("max_parallel_jobs must be greater than 0");
        }

        if let Some(url) = &self.executor_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("executor_url must start with http:// or https://");
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
