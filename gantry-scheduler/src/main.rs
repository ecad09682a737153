//! Gantry Scheduler
//!
//! A host-side harness that delegates jobs to a remote executor through
//! the lifecycle manager and polls them to completion.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Executor client: HTTP against a real executor, or the simulated one
//! - Manager: submit/poll/release lifecycle per handle
//! - Driver: per-handle polling loop under a concurrency cap
//!
//! Handles are persisted after every poll, so a scheduler that crashed
//! mid-job picks its jobs back up on the next start.

mod config;
mod driver;

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::driver::PollDriver;
use gantry_agent::{HandleStore, JobAgent, LifecycleManager};
use gantry_client::{ExecutorClient, HttpExecutorClient, SimulatedExecutor};
use gantry_core::domain::job::{CONFIG_VERSION, JobConfig, JobDescriptor, JobInputs};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gantry_scheduler=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gantry scheduler");

    let config = Config::from_env();
    config.validate()?;
    info!(
        "Loaded configuration: poll_interval={:?}, max_parallel_jobs={}, state_dir={}",
        config.poll_interval,
        config.max_parallel_jobs,
        config.state_dir.display()
    );

    // Pick the executor client
    let client: Arc<dyn ExecutorClient> = match &config.executor_url {
        Some(url) => {
            info!("Using HTTP executor at {}", url);
            Arc::new(HttpExecutorClient::new(url.clone()))
        }
        None => {
            info!("EXECUTOR_URL not set, using the simulated executor");
            Arc::new(SimulatedExecutor::new())
        }
    };

    let manager = Arc::new(LifecycleManager::new(client));
    let store = Arc::new(HandleStore::open(&config.state_dir)?);

    // Resume handles left over from a previous run
    let mut handles = store.list()?;
    if !handles.is_empty() {
        info!("Resuming {} persisted handle(s)", handles.len());
    }

    // Submit the demo job
    let submitted = manager.submit(&demo_descriptor()).await?;
    info!(remote = %submitted.remote, "submitted job");
    store.save(&submitted)?;
    handles.push(submitted);

    // Drive every handle to a settled phase under the concurrency cap
    let semaphore = Arc::new(Semaphore::new(config.max_parallel_jobs));
    let mut tasks = Vec::new();

    for mut handle in handles {
        let driver = PollDriver::new(Arc::clone(&manager), config.poll_interval);
        let store = Arc::clone(&store);
        let permit = semaphore.clone().acquire_owned().await?;

        tasks.push(tokio::spawn(async move {
            let phase = driver.drive(&mut handle, &store).await;
            drop(permit);
            (handle.remote.clone(), phase)
        }));
    }

    for task in tasks {
        match task.await {
            Ok((remote, phase)) => info!(%remote, %phase, "job drained"),
            Err(e) => error!("poll task panicked: {}", e),
        }
    }

    info!("All jobs drained, shutting down");
    Ok(())
}

/// Descriptor for the demonstration job the scheduler submits on startup
fn demo_descriptor() -> JobDescriptor {
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
