//! Executor REST endpoints
//!
//! Maps the executor's HTTP surface onto the [`ExecutorClient`] capability
//! and its wire failures onto the error taxonomy: 404 on a status query is
//! a dead ref, 5xx and transport failures are transient, a rejected
//! submission is fatal to that submit attempt.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{ExecutorError, Result};
use crate::{ExecutorClient, HttpExecutorClient};
use gantry_core::domain::job::{JobDescriptor, JobResult, RemoteRef};
use gantry_core::domain::phase::ExecutorStatus;
use gantry_core::dto::job::{StatusResponse, SubmitJobRequest, SubmitJobResponse};

#[async_trait]
impl ExecutorClient for HttpExecutorClient {
    async fn start(&self, descriptor: &JobDescriptor) -> Result<RemoteRef> {
        let url = format!("{}/api/jobs", self.base_url);
        debug!("Submitting job to queue '{}'", descriptor.config.queue);

        let response = self
            .client
            .post(&url)
            .json(&SubmitJobRequest {
                descriptor: descriptor.clone(),
            })
            .send()
            .await
            .map_err(|e| ExecutorError::submission(format!("submit request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::error_body(response).await;
            return Err(ExecutorError::submission(format!(
                "executor rejected submission (status {}): {}",
                status.as_u16(),
                body
            )));
        }

        let ack: SubmitJobResponse = response
            .json()
            .await
            .map_err(|e| ExecutorError::submission(format!("failed to parse submit response: {e}")))?;

        debug!("Executor accepted job as {}", ack.remote);
        Ok(ack.remote)
    }

    async fn status(&self, remote: &RemoteRef) -> Result<ExecutorStatus> {
        let url = format!("{}/api/jobs/{}/status", self.base_url, remote);
        debug!("Querying status of job {}", remote);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExecutorError::transient_query(format!("status request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ExecutorError::ref_not_found(remote));
        }
        if !status.is_success() {
            let body = Self::error_body(response).await;
            return Err(ExecutorError::transient_query(format!(
                "status query failed (status {}): {}",
                status.as_u16(),
                body
            )));
        }

        let report: StatusResponse = response.json().await.map_err(|e| {
            ExecutorError::transient_query(format!("failed to parse status response: {e}"))
        })?;

        debug!("Job {} reported status {}", remote, report.status);
        Ok(ExecutorStatus::parse(&report.status))
    }

    async fn fetch_result(&self, remote: &RemoteRef) -> Result<JobResult> {
        let url = format!("{}/api/jobs/{}/result", self.base_url, remote);
        debug!("Fetching result of job {}", remote);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExecutorError::transient_query(format!("result request failed: {e}")))?;

        let status = response.status();
        if status.is_server_error() {
            let body = Self::error_body(response).await;
            return Err(ExecutorError::transient_query(format!(
                "result query failed (status {}): {}",
                status.as_u16(),
                body
            )));
        }
        if !status.is_success() {
            let body = Self::error_body(response).await;
            return Err(ExecutorError::result_unavailable(format!(
                "executor refused result (status {}): {}",
                status.as_u16(),
                body
            )));
        }

        response.json().await.map_err(|e| {
            ExecutorError::transient_query(format!("failed to parse result payload: {e}"))
        })
    }

    async fn cancel(&self, remote: &RemoteRef) -> Result<()> {
        let url = format!("{}/api/jobs/{}", self.base_url, remote);
        debug!("Cancelling job {}", remote);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ExecutorError::transient_query(format!("cancel request failed: {e}")))?;

        let status = response.status();
        // A job that is already gone counts as cancelled.
        if status.is_success() || status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Ok(());
        }

        let body = Self::error_body(response).await;
        Err(ExecutorError::transient_query(format!(
            "cancel failed (status {}): {}",
            status.as_u16(),
            body
        )))
    }
}
