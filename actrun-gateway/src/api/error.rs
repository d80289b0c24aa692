//! API Error Handling
//!
//! Unified error type and conversion for gateway responses. Every failure
//! path produces the `{success: false, message, [error]}` envelope; nothing
//! from the upstream client leaves this layer unmapped.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use actrun_core::dto::envelope::ErrorBody;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Credential header absent on a protected endpoint
    MissingApiKey,
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    /// Upstream rejected the run input; `detail` carries its message
    InvalidInput {
        message: String,
        detail: Option<String>,
    },
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingApiKey => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("API key is required in headers"),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorBody::new(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg)),
            ApiError::InvalidInput { message, detail } => (
                StatusCode::BAD_REQUEST,
                match detail {
                    Some(detail) => ErrorBody::with_detail(message, detail),
                    None => ErrorBody::new(message),
                },
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
