use serde::{Deserialize, Serialize};

/// Registration payload sent to `/register`.
///
/// Built by the caller per call and discarded after use; the client passes
/// it through to the service unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Login payload sent to `/token-json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRetrieve {
    pub username: String,
    pub password: String,
}

/// Full user record returned by registration.
///
/// Owned by the caller once decoded; registration does not start a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}
