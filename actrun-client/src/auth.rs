//! Credential validation endpoint

use actrun_core::dto::auth::{ValidateKeyRequest, ValidateKeyResponse};

use crate::GatewayClient;
use crate::error::Result;

impl GatewayClient {
    /// Validate an API key against the gateway
    ///
    /// This is the one call that does not use the stored credential: the
    /// key under test goes in the request body. On success the caller
    /// usually stores the key via [`GatewayClient::set_api_key`].
    ///
    /// # Arguments
    /// * `api_key` - The credential to validate
    ///
    /// # Returns
    /// The validation response, including the account identity
    pub async fn validate_key(&self, api_key: &str) -> Result<ValidateKeyResponse> {
        let url = format!("{}/api/validate-key", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ValidateKeyRequest {
                api_key: api_key.to_string(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }
}
