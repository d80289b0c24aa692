//! Error envelope shared by every failing gateway response

use serde::{Deserialize, Serialize};

/// Body of every non-2xx gateway response.
///
/// `error` carries upstream detail when there is any (e.g. the remote
/// validation message on a rejected run input).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(detail.into()),
        }
    }
}
