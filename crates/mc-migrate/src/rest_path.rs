//! REST migration path: fetch both folders, diff by name, copy the missing.

use std::collections::BTreeSet;

use tracing::{debug, info, instrument};

use sfmc_catalog::RestDefinition;
use sfmc_client::Record;
use sfmc_rest::QueryParams;

use crate::error::Result;
use crate::payload;
use crate::{nothing_to_migrate, MigrationReport, Migrator};

impl Migrator {
    /// Copy REST objects between folders, skipping names the destination
    /// already has. Running the same migration twice copies nothing the
    /// second time and fails with the nothing-to-migrate error.
    #[instrument(skip(self, definition), fields(object = %definition.name))]
    pub(crate) async fn migrate_rest(
        &self,
        definition: &RestDefinition,
        source_folder: &str,
        dest_folder: &str,
    ) -> Result<MigrationReport> {
        let source = self.fetch_rest_folder(definition, source_folder).await?;
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

        let destination = self.fetch_rest_folder(definition, dest_folder).await?;
        debug!(count = destination.len(), dest_folder, "Fetched destination objects");

        let source_names: BTreeSet<&str> = names(&source);
        let destination_names: BTreeSet<&str> = names(&destination);
        let unique: BTreeSet<&str> = source_names
            .difference(&destination_names)
            .copied()
            .collect();

        if unique.is_empty() {
            return Err(nothing_to_migrate(
                &definition.name,
                "all items already exist in the target folder",
            ));
        }

        let mut report = MigrationReport::default();
        for record in &source {
            let Some(name) = record.get("name").and_then(|v| v.as_str()) else {
                continue;
            };
            if !unique.contains(name) {
                info!(name, "Skipping, already present in the target folder");
                report.skipped += 1;
                continue;
            }

            let mut item = payload::shape_payload(record, dest_folder);
            if payload::is_image(record) {
                if let Some(file_path) = payload::file_subresource(&definition.endpoint, record) {
                    debug!(name, path = %file_path, "Fetching image file body");
                    item["file"] = self.rest.get_raw(&file_path, &QueryParams::new()).await?;
                }
            }

            self.rest.post(&definition.endpoint, &item).await?;
            info!(name, "Copied object");
            report.copied += 1;
        }

        Ok(report)
    }

    /// Drain every object of a definition that lives in a folder, using the
    /// server-side folder filter.
    async fn fetch_rest_folder(
        &self,
        definition: &RestDefinition,
        folder: &str,
    ) -> Result<Vec<Record>> {
        let mut params = QueryParams::new().page(1).page_size(50);
        if !definition.fields.is_empty() {
            params = params.fields(definition.fields.clone());
        }
        if let Some(order_by) = &definition.order_by {
            params = params.order_by(order_by.clone());
        }
        params = params.filter(format!("category.id={}", folder));

        let result = self.rest.get(&definition.endpoint, &params, true).await?;
        Ok(result.records)
    }
}

/// The name set of a record list; records without a name are ignored.
fn names(records: &[Record]) -> BTreeSet<&str> {
    records
        .iter()
        .filter_map(|record| record.get("name").and_then(|v| v.as_str()))
        .collect()
}
