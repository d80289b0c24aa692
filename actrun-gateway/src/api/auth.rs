//! Credential handling
//!
//! The `ApiKey` extractor reads the credential from the `api-key` (or
//! legacy `apikey`) header on every protected endpoint. The validate-key
//! endpoint is the exception: it takes the key in the request body, since
//! the caller does not yet know whether it is valid.

use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use serde_json::Value;

use actrun_core::dto::auth::ValidateKeyResponse;
use actrun_upstream::UpstreamError;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// The caller's credential, forwarded verbatim to the upstream service.
#[derive(Debug, Clone)]
pub struct ApiKey(pub String);

impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;
        let key = headers
            .get("api-key")
            .or_else(|| headers.get("apikey"))
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty());

        match key {
            Some(key) => Ok(ApiKey(key.to_string())),
            None => Err(ApiError::MissingApiKey),
        }
    }
}

/// POST /api/validate-key
/// Validate a credential against the upstream service
pub async fn validate_key(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ValidateKeyResponse>> {
    let api_key = body
        .get("apiKey")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Valid API key is required".to_string()))?;

    tracing::info!("Validating API key");

    let user = state
        .upstream
        .validate_token(api_key)
        .await
        .map_err(|e| match e {
            UpstreamError::Auth(_) => ApiError::Unauthorized(
                "Invalid API key. Please check your credentials.".to_string(),
            ),
            _ => ApiError::Internal("Failed to validate API key. Please try again.".to_string()),
        })?;

    Ok(Json(ValidateKeyResponse {
        success: true,
        message: Some("API key is valid".to_string()),
        user,
    }))
}
