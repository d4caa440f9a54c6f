//! Error types for sfmc-catalog.

/// Result type alias for sfmc-catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfmc-catalog operations.
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
    /// Catalog file could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// Catalog document failed to parse or validate.
    #[error("Catalog error: {0}")]
    Parse(String),

    /// Requested object name absent from both catalogs.
    #[error("Object '{0}' not found in catalogs")]
    UnknownObject(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Parse(err.to_string()), err)
    }
}
