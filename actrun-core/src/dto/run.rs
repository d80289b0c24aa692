//! Run lifecycle DTOs

use serde::{Deserialize, Serialize};

use crate::domain::run::RunStatus;

/// Response after successfully triggering a run.
///
/// The run is started asynchronously; `check_status_url` points at the
/// status endpoint the caller is expected to poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStartedResponse {
    pub success: bool,
    pub run_id: String,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub check_status_url: String,
}

/// Response of a status check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatusResponse {
    pub success: bool,
    pub run_id: String,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// Response carrying the dataset of a finished run.
///
/// `results` is the untyped record sequence as returned upstream; `count`
/// is its length (1 for a non-array payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResultsResponse {
    pub success: bool,
    pub results: serde_json::Value,
    pub count: usize,
}
