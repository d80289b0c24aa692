//! Error types for the gateway client

use thiserror::Error;

use actrun_core::dto::envelope::ErrorBody;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the gateway
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Gateway returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Message from the gateway's error envelope
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// An operation needing the credential was called before one was set
    #[error("no API key configured")]
    MissingApiKey,
}

impl ClientError {
    /// Create an API error from a status code and raw body, pulling the
    /// message out of the error envelope when the body is one.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Self::ApiError { status, message }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Status code for API errors, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_message_is_extracted() {
        let err = ClientError::from_status(
            400,
            r#"{"success":false,"message":"API key is required in headers"}"#.to_string(),
        );
        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key is required in headers");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_raw_body_fallback() {
        let err = ClientError::from_status(502, "Bad Gateway".to_string());
        assert!(err.is_server_error());
        assert!(!err.is_not_found());
    }
}
