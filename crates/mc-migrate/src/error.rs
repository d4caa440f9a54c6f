//! Error types for sfmc-migrate.

/// Result type alias for sfmc-migrate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfmc-migrate operations.
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
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Catalog lookup or load failure.
    #[error(transparent)]
    Catalog(sfmc_catalog::Error),

    /// SOAP adapter failure.
    #[error(transparent)]
    Soap(sfmc_soap::Error),

    /// REST adapter failure.
    #[error(transparent)]
    Rest(sfmc_rest::Error),

    /// The diff yielded nothing to copy. A deliberate hard failure rather
    /// than a benign no-op.
    #[error("Nothing to migrate for '{object}': {reason}")]
    NothingToMigrate { object: String, reason: String },
}

impl Error {
    /// Returns true if this is the nothing-to-migrate outcome.
    pub fn is_nothing_to_migrate(&self) -> bool {
        matches!(self.kind, ErrorKind::NothingToMigrate { .. })
    }
}

impl From<sfmc_catalog::Error> for Error {
    fn from(err: sfmc_catalog::Error) -> Self {
        Error::new(ErrorKind::Catalog(err))
    }
}

impl From<sfmc_soap::Error> for Error {
    fn from(err: sfmc_soap::Error) -> Self {
        Error::new(ErrorKind::Soap(err))
    }
}

impl From<sfmc_rest::Error> for Error {
    fn from(err: sfmc_rest::Error) -> Self {
        Error::new(ErrorKind::Rest(err))
    }
}
