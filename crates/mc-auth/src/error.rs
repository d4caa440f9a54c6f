//! Error types for sfmc-auth.
//!
//! Error messages are designed to avoid exposing credential data.

/// Result type alias for sfmc-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfmc-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// OAuth error response from the authentication endpoint.
    #[error("OAuth error: {error} - {description}")]
    OAuth { error: String, description: String },

    /// The credential exchange succeeded but returned no usable token.
    #[error("Token response carried no usable access token")]
    TokenMissing,

    /// HTTP error during the credential exchange.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON error decoding the token response.
    #[error("JSON error: {0}")]
    Json(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Sanitize the message in case a URL with embedded credentials leaks
        let message = err.to_string();
        let sanitized = if message.contains("access_token") || message.contains("token=") {
            "HTTP request failed (details redacted for security)".to_string()
        } else {
            message
        };
        Error::with_source(ErrorKind::Http(sanitized), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::TokenMissing;
        assert_eq!(err.to_string(), "Token response carried no usable access token");

        let err = ErrorKind::OAuth {
            error: "invalid_client".to_string(),
            description: "Invalid client ID".to_string(),
        };
        assert_eq!(err.to_string(), "OAuth error: invalid_client - Invalid client ID");
    }

    #[test]
    fn test_error_messages_dont_contain_credentials() {
        let err = Error::new(ErrorKind::Config("missing auth_url".to_string()));
        let msg = err.to_string();
        assert!(!msg.contains("Bearer"));
        assert!(!msg.contains("secret"));
    }
}
