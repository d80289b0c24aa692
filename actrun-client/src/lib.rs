//! Actrun Gateway Client
//!
//! A simple, type-safe HTTP client for the actrun gateway API.
//!
//! The client carries the user's API key and attaches it as the `api-key`
//! header on every call except credential validation, which sends the key
//! in the body so it can be checked before being trusted.
//!
//! # Example
//!
//! ```no_run
//! use actrun_client::GatewayClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GatewayClient::new("http://localhost:3000").with_api_key("my-key");
//!
//!     let actors = client.public_actors(Some("scraper"), None, Some(20)).await?;
//!     for actor in actors {
//!         println!("{}: {}", actor.id, actor.title);
//!     }
//!     Ok(())
//! }
//! ```

mod actors;
mod auth;
pub mod error;
mod runs;

pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// HTTP client for the actrun gateway API
#[derive(Debug, Clone)]
pub struct GatewayClient {
    /// Base URL of the gateway (e.g., "http://localhost:3000")
    base_url: String,
    /// Credential sent as the `api-key` header
    api_key: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl GatewayClient {
    /// Create a new gateway client without a credential.
    ///
    /// Calls that need one fail with [`ClientError::MissingApiKey`] until
    /// [`GatewayClient::with_api_key`] or [`GatewayClient::set_api_key`]
    /// provides it.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            client: Client::new(),
        }
    }

    /// Attach a credential to this client
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace the credential on an existing client
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    /// Get the base URL of the gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request/Response Handlers
    // =============================================================================

    /// Attach the credential header, failing when none is configured
    fn authed(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let key = self.api_key.as_ref().ok_or(ClientError::MissingApiKey)?;
        Ok(builder.header("api-key", key))
    }

    /// Handle a gateway response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::from_status(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GatewayClient::new("http://localhost:3000");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GatewayClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_missing_key_is_rejected_before_sending() {
        let client = GatewayClient::new("http://localhost:3000");
        let builder = client.client.get("http://localhost:3000/api/my-actors");
        assert!(matches!(
            client.authed(builder),
            Err(ClientError::MissingApiKey)
        ));
    }
}
