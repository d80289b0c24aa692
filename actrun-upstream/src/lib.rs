//! Actrun Upstream Client
//!
//! Client for the third-party automation API that hosts the actors. Each
//! operation issues exactly one authenticated HTTP call with a bounded
//! timeout and returns either a normalized domain value or an
//! [`UpstreamError`]. No retries happen at this layer.
//!
//! The [`AutomationApi`] trait is the seam the gateway depends on; tests
//! substitute a stub implementation, production uses [`HttpAutomationApi`].

pub mod error;
mod http;
mod wire;

pub use error::{Result, UpstreamError};
pub use http::{DEFAULT_BASE_URL, HttpAutomationApi};

use async_trait::async_trait;
use serde_json::Value;

use actrun_core::domain::actor::{ActorDetail, ActorSummary};
use actrun_core::domain::run::{RunSnapshot, StartedRun};
use actrun_core::domain::user::UserAccount;

/// Parameters for listing public actors.
#[derive(Debug, Clone, Default)]
pub struct StoreQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Already clamped by the caller; forwarded verbatim.
    pub limit: u32,
}

/// Parameters for fetching run results.
#[derive(Debug, Clone)]
pub struct ResultsQuery {
    pub format: String,
    /// Already clamped by the caller; forwarded verbatim.
    pub limit: u32,
}

impl Default for ResultsQuery {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            limit: 100,
        }
    }
}

/// Operations against the remote automation service.
///
/// Every operation takes the caller's credential and forwards it verbatim
/// as a bearer token.
#[async_trait]
pub trait AutomationApi: Send + Sync {
    /// Validates a credential and returns the account it belongs to.
    async fn validate_token(&self, token: &str) -> Result<UserAccount>;

    /// Lists the actors owned by the credential's account.
    async fn list_own_actors(&self, token: &str) -> Result<Vec<ActorSummary>>;

    /// Lists public actors from the store, optionally filtered.
    async fn list_public_actors(
        &self,
        token: &str,
        query: &StoreQuery,
    ) -> Result<Vec<ActorSummary>>;

    /// Fetches one actor, including its declared input schema.
    async fn get_actor(&self, token: &str, actor_id: &str) -> Result<ActorDetail>;

    /// Starts a run of an actor with the given input payload.
    async fn start_run(&self, token: &str, actor_id: &str, input: &Value) -> Result<StartedRun>;

    /// Fetches the current status of a run.
    async fn run_status(&self, token: &str, run_id: &str) -> Result<RunSnapshot>;

    /// Fetches the dataset produced by a run.
    async fn run_results(&self, token: &str, run_id: &str, query: &ResultsQuery) -> Result<Value>;
}
