//! Client configuration: tenant endpoints and credentials.
//!
//! A configuration comes from environment variables or from a keyed JSON
//! file holding one entry per tenant (the original `conf.json` layout).

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};

/// Everything needed to construct a [`MarketingClient`](crate::MarketingClient).
///
/// The client secret is redacted in Debug output.
#[derive(Clone)]
pub struct MarketingConfig {
    /// Installed package client id.
    pub client_id: String,
    client_secret: String,
    /// Business unit (MID), if the token should be scoped to one.
    pub account_id: Option<String>,
    /// Authentication base URL.
    pub auth_url: String,
    /// REST base URL.
    pub rest_url: String,
    /// SOAP service endpoint.
    pub soap_url: String,
}

impl std::fmt::Debug for MarketingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketingConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .field("auth_url", &self.auth_url)
            .field("rest_url", &self.rest_url)
            .field("soap_url", &self.soap_url)
            .finish()
    }
}

/// One tenant entry of a keyed configuration file.
#[derive(Deserialize)]
struct ConfigEntry {
    clientid: String,
    clientsecret: String,
    authenticationurl: String,
    baseapiurl: String,
    soapendpoint: String,
    #[serde(default)]
    accountid: Option<String>,
}

impl MarketingConfig {
    /// Create a configuration from explicit values.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_url: impl Into<String>,
        rest_url: impl Into<String>,
        soap_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            account_id: None,
            auth_url: auth_url.into(),
            rest_url: rest_url.into(),
            soap_url: soap_url.into(),
        }
    }

    /// Scope tokens to a business unit.
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Get the client secret (for internal use).
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Load the configuration from environment variables.
    ///
    /// Required: `SFMC_CLIENT_ID`, `SFMC_CLIENT_SECRET`, `SFMC_AUTH_URL`,
    /// `SFMC_REST_URL`, `SFMC_SOAP_ENDPOINT`. Optional: `SFMC_ACCOUNT_ID`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| Error::new(ErrorKind::EnvVar(name.to_string())))
        };

        let mut config = Self::new(
            var("SFMC_CLIENT_ID")?,
            var("SFMC_CLIENT_SECRET")?,
            var("SFMC_AUTH_URL")?,
            var("SFMC_REST_URL")?,
            var("SFMC_SOAP_ENDPOINT")?,
        );
        if let Ok(account_id) = std::env::var("SFMC_ACCOUNT_ID") {
            config = config.with_account_id(account_id);
        }

        Ok(config)
    }

    /// Load one tenant's configuration from a keyed JSON file.
    ///
    /// The file maps lookup keys to tenant entries:
    ///
    /// ```json
    /// {
    ///   "1": {
    ///     "clientid": "...", "clientsecret": "...",
    ///     "authenticationurl": "https://...", "baseapiurl": "https://...",
    ///     "soapendpoint": "https://...", "accountid": "523001234"
    ///   }
    /// }
    /// ```
    pub fn from_file(path: impl AsRef<Path>, key: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut entries: std::collections::HashMap<String, ConfigEntry> =
            serde_json::from_str(&json)?;

        let entry = entries.remove(key).ok_or_else(|| {
            Error::new(ErrorKind::Config(format!(
                "no configuration entry for key '{}'",
                key
            )))
        })?;

        let mut config = Self::new(
            entry.clientid,
            entry.clientsecret,
            entry.authenticationurl,
            entry.baseapiurl,
            entry.soapendpoint,
        );
        if let Some(account_id) = entry.accountid {
            config = config.with_account_id(account_id);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONF_JSON: &str = r#"{
        "1": {
            "clientid": "id-1",
            "clientsecret": "secret-1",
            "authenticationurl": "https://auth.example.com",
            "baseapiurl": "https://rest.example.com",
            "soapendpoint": "https://soap.example.com/Service.asmx",
            "accountid": "523001234"
        },
        "2": {
            "clientid": "id-2",
            "clientsecret": "secret-2",
            "authenticationurl": "https://auth2.example.com",
            "baseapiurl": "https://rest2.example.com",
            "soapendpoint": "https://soap2.example.com/Service.asmx"
        }
    }"#;

    #[test]
    fn test_from_file_resolves_by_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONF_JSON.as_bytes()).unwrap();

        let config = MarketingConfig::from_file(file.path(), "1").unwrap();
        assert_eq!(config.client_id, "id-1");
        assert_eq!(config.account_id.as_deref(), Some("523001234"));
        assert_eq!(config.soap_url, "https://soap.example.com/Service.asmx");

        let config = MarketingConfig::from_file(file.path(), "2").unwrap();
        assert_eq!(config.client_id, "id-2");
        assert!(config.account_id.is_none());
    }

    #[test]
    fn test_from_file_unknown_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONF_JSON.as_bytes()).unwrap();

        let err = MarketingConfig::from_file(file.path(), "9").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = MarketingConfig::new(
            "id",
            "super_secret",
            "https://auth.example.com",
            "https://rest.example.com",
            "https://soap.example.com",
        );
        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret"));
    }

    #[test]
    fn test_from_env_reports_missing_variable() {
        // The full set is never present in the test environment.
        std::env::remove_var("SFMC_CLIENT_ID");
        let err = MarketingConfig::from_env().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EnvVar(_)));
    }
}
