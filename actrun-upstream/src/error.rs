//! Error types for the upstream automation API client

use thiserror::Error;

/// Result type alias for upstream operations
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Normalized failure of one upstream call.
///
/// Every operation fails with exactly one of these; callers never see raw
/// HTTP status codes or transport errors. Retry policy, if any, belongs to
/// the caller.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// The remote service rejected the credential
    #[error("credential rejected: {0}")]
    Auth(String),

    /// The referenced actor or run does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote service rejected the input payload
    #[error("input rejected: {0}")]
    Validation(String),

    /// Network failure, timeout, or a 5xx from the remote service
    #[error("transient upstream failure: {0}")]
    Transient(String),

    /// Anything else
    #[error("upstream error: {0}")]
    Unknown(String),
}

impl UpstreamError {
    /// Maps a non-success HTTP status to the error taxonomy.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            400 => UpstreamError::Validation(body),
            401 | 403 => UpstreamError::Auth(body),
            404 => UpstreamError::NotFound(body),
            s if s >= 500 => UpstreamError::Transient(body),
            _ => UpstreamError::Unknown(body),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, UpstreamError::Auth(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound(_))
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, UpstreamError::Transient(_))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            UpstreamError::Transient(err.to_string())
        } else {
            UpstreamError::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            UpstreamError::from_status(400, "bad input"),
            UpstreamError::Validation(_)
        ));
        assert!(UpstreamError::from_status(401, "nope").is_auth());
        assert!(UpstreamError::from_status(403, "nope").is_auth());
        assert!(UpstreamError::from_status(404, "gone").is_not_found());
        assert!(UpstreamError::from_status(500, "boom").is_transient());
        assert!(UpstreamError::from_status(503, "busy").is_transient());
        assert!(matches!(
            UpstreamError::from_status(418, "teapot"),
            UpstreamError::Unknown(_)
        ));
    }
}
