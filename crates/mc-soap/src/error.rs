//! Error types for sfmc-soap.

/// Result type alias for sfmc-soap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfmc-soap operations.
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
    /// SOAP fault returned by the service.
    #[error("SOAP fault: {0}")]
    SoapFault(String),

    /// The service reported a terminal non-success retrieve status.
    #[error("Retrieve failed with status: {0}")]
    Status(String),

    /// Non-2xx HTTP response outside of a SOAP fault.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Response XML was missing a required element.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token acquisition failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ErrorKind::Other(err.to_string())
        };
        Error::with_source(kind, err)
    }
}

impl From<sfmc_auth::Error> for Error {
    fn from(err: sfmc_auth::Error) -> Self {
        Error::with_source(ErrorKind::Auth(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::SoapFault("fueloauth: Token Expired".to_string());
        assert_eq!(err.to_string(), "SOAP fault: fueloauth: Token Expired");

        let err = ErrorKind::Status("Error: object type unknown".to_string());
        assert!(err.to_string().contains("object type unknown"));
    }

    #[test]
    fn test_auth_error_conversion() {
        let auth_err = sfmc_auth::Error::new(sfmc_auth::ErrorKind::TokenMissing);
        let err: Error = auth_err.into();
        assert!(matches!(err.kind, ErrorKind::Auth(_)));
        assert!(err.source.is_some());
    }
}
