//! Installed-package credentials.
//!
//! Immutable after construction. The secret is redacted in Debug output to
//! prevent accidental exposure in logs.

/// Credentials for the client-credentials grant.
#[derive(Clone)]
pub struct ClientCredentials {
    /// Client id of the installed package.
    pub client_id: String,
    /// Client secret. Redacted in Debug output.
    client_secret: String,
    /// Business unit (MID) to scope the token to, if any.
    pub account_id: Option<String>,
    /// Authentication base URL (the tenant's `auth.*` endpoint).
    pub auth_url: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

impl ClientCredentials {
    /// Create new credentials.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            account_id: None,
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Scope the token to a business unit.
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Get the client secret (for internal use).
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// The token endpoint derived from the auth URL.
    pub fn token_url(&self) -> String {
        format!("{}/v2/token", self.auth_url)
    }
}
