//! Error types for sfmc-rest.

/// Result type alias for sfmc-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfmc-rest operations.
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
    /// Transport or API error from the underlying HTTP client.
    #[error(transparent)]
    Client(sfmc_client::Error),

    /// Token acquisition failed.
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl From<sfmc_client::Error> for Error {
    fn from(err: sfmc_client::Error) -> Self {
        Error::new(ErrorKind::Client(err))
    }
}

impl From<sfmc_auth::Error> for Error {
    fn from(err: sfmc_auth::Error) -> Self {
        Error::with_source(ErrorKind::Auth(err.to_string()), err)
    }
}
