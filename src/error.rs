//! Error types for the facade crate.

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for facade operations.
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
    /// Required environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration file problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// REST adapter failure.
    #[error(transparent)]
    Rest(sfmc_rest::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Config(err.to_string()), err)
    }
}

impl From<sfmc_rest::Error> for Error {
    fn from(err: sfmc_rest::Error) -> Self {
        Error::new(ErrorKind::Rest(err))
    }
}
