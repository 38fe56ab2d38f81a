use serde::{Deserialize, Serialize};

/// Bearer token issued by `/token-json` after successful authentication.
///
/// The `access_token` string is the only piece of session state that gets
/// persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "tokenType", default)]
    pub token_type: Option<String>,
}
