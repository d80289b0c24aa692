//! Run API seam
//!
//! The monitor only needs three operations; keeping them behind a trait
//! lets tests drive the poll loop with scripted status sequences instead of
//! a live gateway.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use actrun_client::{ClientError, GatewayClient};
use actrun_core::domain::run::{RunSnapshot, StartedRun};

/// Failure of one run operation, split only as far as the monitor cares:
/// a rejected input payload is surfaced differently from everything else.
#[derive(Debug, Clone, Error)]
pub enum RunApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Failed(String),
}

/// Operations the run monitor drives
#[async_trait]
pub trait RunApi: Send + Sync {
    /// Starts a run and returns its remote-assigned id and initial status
    async fn start_run(&self, actor_id: &str, input: &Value) -> Result<StartedRun, RunApiError>;

    /// Fetches the current status of a run
    async fn run_status(&self, run_id: &str) -> Result<RunSnapshot, RunApiError>;

    /// Fetches the dataset of a finished run
    async fn run_results(&self, run_id: &str, limit: u32) -> Result<Value, RunApiError>;
}

fn map_client_error(err: ClientError) -> RunApiError {
    match err.status() {
        Some(400) => RunApiError::InvalidInput(err.to_string()),
        _ => RunApiError::Failed(err.to_string()),
    }
}

#[async_trait]
impl RunApi for GatewayClient {
    async fn start_run(&self, actor_id: &str, input: &Value) -> Result<StartedRun, RunApiError> {
        let response = GatewayClient::start_run(self, actor_id, input)
            .await
            .map_err(map_client_error)?;

        Ok(StartedRun {
            id: response.run_id,
            status: response.status,
        })
    }

    async fn run_status(&self, run_id: &str) -> Result<RunSnapshot, RunApiError> {
        let response = GatewayClient::run_status(self, run_id)
            .await
            .map_err(map_client_error)?;

        Ok(RunSnapshot {
            id: response.run_id,
            status: response.status,
            started_at: response.started_at,
            finished_at: response.finished_at,
            stats: response.stats,
            meta: response.meta,
        })
    }

    async fn run_results(&self, run_id: &str, limit: u32) -> Result<Value, RunApiError> {
        let response = GatewayClient::run_results(self, run_id, Some(limit), None)
            .await
            .map_err(map_client_error)?;

        Ok(response.results)
    }
}
