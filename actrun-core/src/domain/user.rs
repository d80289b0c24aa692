//! User account types

use serde::{Deserialize, Serialize};

/// Identity returned by a successful credential validation.
///
/// `plan` is passed through untyped; the remote service reports it as a
/// plain string on some plans and a structured object on others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<serde_json::Value>,
}
