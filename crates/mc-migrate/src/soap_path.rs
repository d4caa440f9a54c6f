//! SOAP migration path: fetch, re-target, re-create.

use tracing::{debug, info, instrument, warn};

use sfmc_catalog::SoapDefinition;
use sfmc_client::Record;
use sfmc_soap::SimpleFilter;

use crate::error::Result;
use crate::{nothing_to_migrate, MigrationReport, Migrator};

/// Folder field assumed when a definition declares no folder property.
const DEFAULT_FOLDER_FIELD: &str = "CategoryID";

impl Migrator {
    /// Copy SOAP objects between folders. Every source object is re-created
    /// in the destination; no identity diffing is performed on this path.
    #[instrument(skip(self, definition), fields(object = %definition.name))]
    pub(crate) async fn migrate_soap(
        &self,
        definition: &SoapDefinition,
        source_folder: &str,
        dest_folder: &str,
    ) -> Result<MigrationReport> {
        let source = self.fetch_soap_folder(definition, source_folder).await?;
        info!(
            object = %definition.name,
            count = source.len(),
            source_folder,
            "Fetched source objects"
        );
        if source.is_empty() {
            return Err(nothing_to_migrate(
                &definition.name,
                "no objects found in the source folder",
            ));
        }

        let destination = self.fetch_soap_folder(definition, dest_folder).await?;
        debug!(count = destination.len(), dest_folder, "Fetched destination objects");

        let folder_field = definition
            .folder_property
            .as_deref()
            .unwrap_or(DEFAULT_FOLDER_FIELD);

        let mut report = MigrationReport::default();
        for record in &source {
            let properties = build_create_properties(record, folder_field, dest_folder);
            let result = self.soap.create(&definition.name, &properties).await?;

            let name = record.get("Name").and_then(|v| v.as_str()).unwrap_or("?");
            if result.is_ok() {
                info!(object = %definition.name, name, "Copied object");
                report.copied += 1;
            } else {
                warn!(
                    object = %definition.name,
                    name,
                    status = %result.status_code,
                    message = result.status_message.as_deref().unwrap_or(""),
                    "Copy rejected by the service"
                );
                report.failed += 1;
            }
        }

        Ok(report)
    }

    /// Fetch all objects of a type that live in a folder.
    ///
    /// When the definition declares a folder property, the folder filter is
    /// pushed into the retrieve request. Otherwise every object of the type
    /// is drained and filtered locally on `CategoryID`.
    async fn fetch_soap_folder(
        &self,
        definition: &SoapDefinition,
        folder: &str,
    ) -> Result<Vec<Record>> {
        let properties = definition.retrieve_properties();

        if let Some(folder_property) = &definition.folder_property {
            let filter = SimpleFilter::equals(folder_property, folder);
            let result = self
                .soap
                .retrieve(&definition.name, properties, Some(&filter), true)
                .await?;
            return Ok(result.records);
        }

        let result = self
            .soap
            .retrieve(&definition.name, properties, None, true)
            .await?;
        Ok(result
            .records
            .into_iter()
            .filter(|record| folder_matches(record, DEFAULT_FOLDER_FIELD, folder))
            .collect())
    }
}

/// Compare a record's folder field against a folder identifier.
fn folder_matches(record: &Record, field: &str, folder: &str) -> bool {
    match record.get(field) {
        Some(serde_json::Value::String(s)) => s == folder,
        Some(serde_json::Value::Number(n)) => n.to_string() == folder,
        _ => false,
    }
}

/// The source record minus its unique identifiers, re-targeted at the
/// destination folder.
fn build_create_properties(record: &Record, folder_field: &str, dest_folder: &str) -> serde_json::Value {
    let mut properties = record.clone();
    properties.remove("ID");
    properties.remove("ObjectID");
    properties.insert(
        folder_field.to_string(),
        serde_json::Value::String(dest_folder.to_string()),
    );
    serde_json::Value::Object(properties)
}
