//! Run lifecycle endpoints

use serde_json::Value;

use actrun_core::dto::run::{RunResultsResponse, RunStartedResponse, RunStatusResponse};

use crate::GatewayClient;
use crate::error::Result;

impl GatewayClient {
    /// Start an actor run
    ///
    /// # Arguments
    /// * `actor_id` - The actor to run
    /// * `input` - The input payload, sent verbatim
    ///
    /// # Returns
    /// The remote-assigned run id and its initial status
    pub async fn start_run(&self, actor_id: &str, input: &Value) -> Result<RunStartedResponse> {
        let url = format!("{}/api/actor/{}/run", self.base_url, actor_id);
        let response = self.authed(self.client.post(&url))?.json(input).send().await?;

        self.handle_response(response).await
    }

    /// Check the current status of a run
    ///
    /// # Arguments
    /// * `run_id` - The run identifier returned by [`GatewayClient::start_run`]
    pub async fn run_status(&self, run_id: &str) -> Result<RunStatusResponse> {
        let url = format!("{}/api/run/{}/status", self.base_url, run_id);
        let response = self.authed(self.client.get(&url))?.send().await?;

        self.handle_response(response).await
    }

    /// Fetch the dataset produced by a run
    ///
    /// # Arguments
    /// * `run_id` - The run identifier
    /// * `limit` - Maximum records; the gateway caps this at 1000
    /// * `format` - Dataset format, defaults to "json"
    pub async fn run_results(
        &self,
        run_id: &str,
        limit: Option<u32>,
        format: Option<&str>,
    ) -> Result<RunResultsResponse> {
        let url = format!("{}/api/run/{}/results", self.base_url, run_id);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(format) = format {
            params.push(("format", format.to_string()));
        }

        let response = self
            .authed(self.client.get(&url))?
            .query(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
