//! Auth client for the Anteroom account service.
//!
//! `AuthClient` wraps the three account operations (register, authenticate,
//! logout) and owns the observable login state. Its collaborators arrive
//! through the constructor: the HTTP client and the token store are both
//! injected, so tests run against a mock server and an in-memory store.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::{Token, UserCreate, UserProfile, UserRetrieve};
use crate::storage::{KeyValueStore, TOKEN_KEY};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Path for account registration
const REGISTER_PATH: &str = "/register";

/// Path for exchanging credentials for a bearer token
const AUTHENTICATE_PATH: &str = "/token-json";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the Anteroom account endpoints.
///
/// Login state is published through a single watch channel: a fresh
/// subscriber reads the present value immediately and then observes every
/// transition. The persisted token and the channel only change together,
/// and only after a fully successful call.
pub struct AuthClient {
    client: Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
    is_logged_in: watch::Sender<bool>,
}

impl AuthClient {
    /// Create a client against `base_url` with its own connection pool.
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(client, base_url, store))
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        let (is_logged_in, _) = watch::channel(false);

        Self {
            client,
            base_url,
            store,
            is_logged_in,
        }
    }

    /// Current login state.
    pub fn is_logged_in(&self) -> bool {
        *self.is_logged_in.borrow()
    }

    /// Subscribe to login-state changes.
    ///
    /// The receiver holds the present value immediately (`borrow()`);
    /// `changed().await` then yields once per subsequent transition. Any
    /// number of independent subscribers may exist.
    pub fn login_state(&self) -> watch::Receiver<bool> {
        self.is_logged_in.subscribe()
    }

    /// Register a new account.
    ///
    /// POST /register
    ///
    /// Login state is untouched either way: a successful registration does
    /// not imply a logged-in session, the caller authenticates separately.
    pub async fn register(&self, user: &UserCreate) -> Result<UserProfile, ApiError> {
        let profile: UserProfile = self.post(REGISTER_PATH, user).await?;
        debug!(username = %profile.username, "Registered account");
        Ok(profile)
    }

    /// Authenticate an existing account.
    ///
    /// POST /token-json
    ///
    /// On success the access token is persisted under `TOKEN_KEY`
    /// (overwriting any prior token) and the login state flips to true. On
    /// any failure neither the store nor the login state changes.
    pub async fn authenticate(&self, user: &UserRetrieve) -> Result<Token, ApiError> {
        let token: Token = self.post(AUTHENTICATE_PATH, user).await?;

        self.store
            .set(TOKEN_KEY, &token.access_token)
            .map_err(ApiError::Storage)?;
        self.is_logged_in.send_replace(true);

        debug!("Authenticated, token persisted");
        Ok(token)
    }

    /// Drop the persisted token and flip the login state to false.
    ///
    /// Purely local, no remote call. Removing an absent token is a no-op;
    /// a storage failure is logged and the state still flips, so logout
    /// itself never fails.
    pub fn logout(&self) {
        if let Err(error) = self.store.remove(TOKEN_KEY) {
            warn!(error = %error, "Failed to clear persisted token");
        }
        self.is_logged_in.send_replace(false);
        debug!("Logged out");
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
