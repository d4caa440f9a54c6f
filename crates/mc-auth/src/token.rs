//! Token lifecycle management.
//!
//! The [`TokenManager`] holds the current bearer token and its absolute
//! expiry. A token is fetched lazily on first use and replaced whenever a
//! caller asks for it at or past expiry. The refresh runs under a mutex so
//! concurrent callers trigger a single credential exchange.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::credentials::ClientCredentials;
use crate::error::{Error, ErrorKind, Result};

/// Tokens are treated as expired this long before the server-reported
/// expiry, so a token is never attached to a request mid-flight of expiring.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// TTL assumed when the server omits `expires_in`.
const DEFAULT_TTL_SECS: u64 = 1200;

/// Owns the short-lived bearer token for a set of credentials.
pub struct TokenManager {
    credentials: ClientCredentials,
    http: reqwest::Client,
    state: Mutex<TokenState>,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct TokenState {
    token: Option<String>,
    expires_at: Option<Instant>,
}

impl TokenState {
    fn current(&self) -> Option<&str> {
        match (&self.token, self.expires_at) {
            (Some(token), Some(expires_at)) if Instant::now() < expires_at => Some(token),
            _ => None,
        }
    }

    fn store(&mut self, token: String, ttl: Duration) {
        self.token = Some(token);
        self.expires_at = Some(Instant::now() + ttl.saturating_sub(EXPIRY_MARGIN));
    }
}

/// Client-credentials grant request body.
#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_id: Option<&'a str>,
}

/// Token response. The token value is redacted in Debug output.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// OAuth error response body.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

impl TokenManager {
    /// Create a new token manager. No exchange happens until the first
    /// [`token`](Self::token) call.
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            http: reqwest::Client::new(),
            state: Mutex::new(TokenState::default()),
        }
    }

    /// Get the credentials this manager was built from.
    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Get the current bearer token, refreshing it if absent or expired.
    ///
    /// Callers performing many requests should call this once per request
    /// rather than caching the value, so refreshes are picked up
    /// transparently.
    #[instrument(skip(self))]
    pub async fn token(&self) -> Result<String> {
        let mut state = self.state.lock().await;

        if let Some(token) = state.current() {
            return Ok(token.to_string());
        }

        let response = self.exchange().await?;
        let ttl = Duration::from_secs(response.expires_in.unwrap_or(DEFAULT_TTL_SECS));
        state.store(response.access_token.clone(), ttl);

        Ok(response.access_token)
    }

    /// Perform the client-credentials grant against the token endpoint.
    async fn exchange(&self) -> Result<TokenResponse> {
        debug!(auth_url = %self.credentials.auth_url, "Requesting access token");

        let body = TokenRequest {
            grant_type: "client_credentials",
            client_id: &self.credentials.client_id,
            client_secret: self.credentials.client_secret(),
            account_id: self.credentials.account_id.as_deref(),
        };

        let response = self
            .http
            .post(self.credentials.token_url())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return match response.json::<OAuthErrorResponse>().await {
                Ok(err) => Err(Error::new(ErrorKind::OAuth {
                    error: err.error,
                    description: err.error_description,
                })),
                Err(_) => Err(Error::new(ErrorKind::Http(format!(
                    "token endpoint returned {}",
                    status
                )))),
            };
        }

        let token: TokenResponse = response.json().await?;
        if token.access_token.is_empty() {
            return Err(Error::new(ErrorKind::TokenMissing));
        }

        Ok(token)
    }
}
