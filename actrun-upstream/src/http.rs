//! HTTP implementation of the automation API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use actrun_core::domain::actor::{ActorDetail, ActorSummary};
use actrun_core::domain::run::{RunSnapshot, StartedRun};
use actrun_core::domain::user::UserAccount;

use crate::error::{Result, UpstreamError};
use crate::wire::{Paged, Wrapped, WireActor, WireActorDetail, WireRun, WireUser};
use crate::{AutomationApi, ResultsQuery, StoreQuery};

/// Base URL of the hosted automation service.
pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

/// Metadata calls (listings, status checks) get a short timeout.
const METADATA_TIMEOUT: Duration = Duration::from_secs(30);

/// Starting a run can take longer since the remote service has to schedule
/// the actor first.
const RUN_START_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the remote automation API over HTTPS.
///
/// Two underlying HTTP clients, one per timeout class: metadata calls are
/// bounded at 30 s, run starts at 120 s.
#[derive(Debug, Clone)]
pub struct HttpAutomationApi {
    base_url: String,
    client: Client,
    run_client: Client,
}

impl HttpAutomationApi {
    /// Creates a client against [`DEFAULT_BASE_URL`].
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (used to point the
    /// gateway at a local stand-in during development).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(METADATA_TIMEOUT)
            .build()
            .map_err(UpstreamError::from)?;
        let run_client = Client::builder()
            .timeout(RUN_START_TIMEOUT)
            .build()
            .map_err(UpstreamError::from)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            run_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authed(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.bearer_auth(token)
    }

    /// Checks the status and deserializes the response body, mapping
    /// failures into the error taxonomy.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UpstreamError::from_status(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Unknown(format!("failed to parse response: {}", e)))
    }
}

#[async_trait]
impl AutomationApi for HttpAutomationApi {
    async fn validate_token(&self, token: &str) -> Result<UserAccount> {
        let url = format!("{}/users/me", self.base_url);
        let response = self.authed(self.client.get(&url), token).send().await?;

        let wrapped: Wrapped<WireUser> = self.handle_response(response).await?;
        Ok(wrapped.data.into())
    }

    async fn list_own_actors(&self, token: &str) -> Result<Vec<ActorSummary>> {
        let url = format!("{}/acts", self.base_url);
        let response = self
            .authed(self.client.get(&url), token)
            .query(&[("limit", "1000"), ("desc", "true")])
            .send()
            .await?;

        let paged: Paged<WireActor> = self.handle_response(response).await?;
        Ok(paged
            .data
            .items
            .into_iter()
            .map(WireActor::into_summary)
            .collect())
    }

    async fn list_public_actors(
        &self,
        token: &str,
        query: &StoreQuery,
    ) -> Result<Vec<ActorSummary>> {
        let url = format!("{}/store", self.base_url);

        let mut params = vec![("limit", query.limit.to_string()), ("desc", "true".into())];
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }

        let response = self
            .authed(self.client.get(&url), token)
            .query(&params)
            .send()
            .await?;

        let paged: Paged<WireActor> = self.handle_response(response).await?;
        Ok(paged
            .data
            .items
            .into_iter()
            .map(WireActor::into_store_summary)
            .collect())
    }

    async fn get_actor(&self, token: &str, actor_id: &str) -> Result<ActorDetail> {
        let url = format!("{}/acts/{}", self.base_url, actor_id);
        let response = self.authed(self.client.get(&url), token).send().await?;

        let wrapped: Wrapped<WireActorDetail> = self.handle_response(response).await?;
        Ok(wrapped.data.into())
    }

    async fn start_run(&self, token: &str, actor_id: &str, input: &Value) -> Result<StartedRun> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_id);

        tracing::debug!(actor_id, "starting actor run");

        // The longer-timeout client: scheduling the actor may be slow.
        let response = self
            .authed(self.run_client.post(&url), token)
            .json(input)
            .send()
            .await?;

        let wrapped: Wrapped<WireRun> = self.handle_response(response).await?;
        Ok(wrapped.data.into())
    }

    async fn run_status(&self, token: &str, run_id: &str) -> Result<RunSnapshot> {
        let url = format!("{}/actor-runs/{}", self.base_url, run_id);
        let response = self.authed(self.client.get(&url), token).send().await?;

        let wrapped: Wrapped<WireRun> = self.handle_response(response).await?;
        Ok(wrapped.data.into())
    }

    async fn run_results(&self, token: &str, run_id: &str, query: &ResultsQuery) -> Result<Value> {
        let url = format!("{}/actor-runs/{}/dataset/items", self.base_url, run_id);
        let response = self
            .authed(self.client.get(&url), token)
            .query(&[
                ("format", query.format.as_str()),
                ("limit", &query.limit.to_string()),
            ])
            .send()
            .await?;

        // Dataset items come back as a bare JSON array, not the usual
        // data envelope.
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let api = HttpAutomationApi::new().unwrap();
        assert_eq!(api.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let api = HttpAutomationApi::with_base_url("http://localhost:9000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:9000");
    }
}
