//! Credential validation DTOs

use serde::{Deserialize, Serialize};

use crate::domain::user::UserAccount;

/// Request body for the initial key validation.
///
/// This is the one endpoint that takes the credential in the body rather
/// than a header, since it is not yet known to be valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyRequest {
    pub api_key: String,
}

/// Successful key validation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateKeyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserAccount,
}
