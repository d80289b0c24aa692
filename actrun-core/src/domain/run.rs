//! Run domain types

use serde::{Deserialize, Serialize};

/// Status of an actor run as reported by the remote service.
///
/// `Succeeded`, `Failed`, `Aborted` and `TimedOut` are terminal; every other
/// status means the run is still in progress and should keep being polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum RunStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
    Aborted,
    TimingOut,
    TimedOut,
}

impl RunStatus {
    /// Returns true when no further progress can occur for this run.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Succeeded | RunStatus::Failed | RunStatus::Aborted | RunStatus::TimedOut
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Ready => "READY",
            RunStatus::Running => "RUNNING",
            RunStatus::Succeeded => "SUCCEEDED",
            RunStatus::Failed => "FAILED",
            RunStatus::Aborted => "ABORTED",
            RunStatus::TimingOut => "TIMING-OUT",
            RunStatus::TimedOut => "TIMED-OUT",
        };
        write!(f, "{}", s)
    }
}

/// A freshly started run: the remote-assigned id plus its initial status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartedRun {
    pub id: String,
    pub status: RunStatus,
}

/// Point-in-time view of a run, as returned by a status check.
///
/// `stats` and `meta` are passed through untyped; their shape belongs to the
/// remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub id: String,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&RunStatus::TimingOut).unwrap();
        assert_eq!(json, "\"TIMING-OUT\"");

        let status: RunStatus = serde_json::from_str("\"TIMED-OUT\"").unwrap();
        assert_eq!(status, RunStatus::TimedOut);

        let status: RunStatus = serde_json::from_str("\"SUCCEEDED\"").unwrap();
        assert_eq!(status, RunStatus::Succeeded);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(RunStatus::Succeeded.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Aborted.is_terminal());
        assert!(RunStatus::TimedOut.is_terminal());

        assert!(!RunStatus::Ready.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(!RunStatus::TimingOut.is_terminal());
    }
}
