//! # sfmc-migrate
//!
//! Folder-to-folder object migration over the unified client.
//!
//! Given an object name and two folder identifiers, the [`Migrator`]
//! resolves the object's catalog definition and branches on protocol:
//!
//! - **SOAP**: every source object is re-created under the destination
//!   folder, with its unique identifier stripped. No identity diffing.
//! - **REST**: objects are diffed by `name`; only names missing from the
//!   destination are copied, which makes repeated runs idempotent. An
//!   empty diff is a hard [`ErrorKind::NothingToMigrate`] failure.
//!
//! A migration that fails partway leaves already-created destination
//! objects in place; there is no rollback.

use tracing::instrument;

use sfmc_catalog::{Catalog, CatalogEntry};
use sfmc_rest::RestClient;
use sfmc_soap::SoapClient;

mod error;
mod payload;
mod rest_path;
mod soap_path;

pub use error::{Error, ErrorKind, Result};

/// Outcome of a completed migration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Objects created in the destination folder.
    pub copied: usize,
    /// Source objects skipped because the destination already had them.
    pub skipped: usize,
    /// SOAP creates the service rejected (logged, not fatal).
    pub failed: usize,
}

/// Folder-to-folder migration engine.
#[derive(Debug, Clone)]
pub struct Migrator {
    soap: SoapClient,
    rest: RestClient,
    catalog: Catalog,
}

impl Migrator {
    /// Create a migrator over the two adapters and a catalog.
    pub fn new(soap: SoapClient, rest: RestClient, catalog: Catalog) -> Self {
        Self {
            soap,
            rest,
            catalog,
        }
    }

    /// Get the catalog in use.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Copy all objects of a type from one folder to another.
    #[instrument(skip(self))]
    pub async fn migrate_folder(
        &self,
        object_name: &str,
        source_folder: &str,
        dest_folder: &str,
    ) -> Result<MigrationReport> {
        match self.catalog.find(object_name)? {
            CatalogEntry::Soap(definition) => {
                self.migrate_soap(definition, source_folder, dest_folder).await
            }
            CatalogEntry::Rest(definition) => {
                self.migrate_rest(definition, source_folder, dest_folder).await
            }
        }
    }
}

pub(crate) fn nothing_to_migrate(object: &str, reason: &str) -> Error {
    Error::new(ErrorKind::NothingToMigrate {
        object: object.to_string(),
        reason: reason.to_string(),
    })
}
