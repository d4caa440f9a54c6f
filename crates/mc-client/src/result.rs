//! The retrieve result model shared by the SOAP and REST adapters.

/// A single record: a mapping of field names to values.
///
/// SOAP-origin records carry a `CategoryID` folder field; REST-origin
/// records carry a nested `category.id` folder field and a `name` field
/// used as the migration identity key.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Outcome of a retrieve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrieveStatus {
    /// The result set is complete.
    Ok,
    /// More pages remain on the server.
    MorePages,
    /// The server reported a terminal non-success status.
    Error(String),
}

impl RetrieveStatus {
    /// Map a SOAP `OverallStatus` string onto the tagged status.
    pub fn from_overall_status(status: &str) -> Self {
        match status {
            "OK" => RetrieveStatus::Ok,
            "MoreDataAvailable" => RetrieveStatus::MorePages,
            other => RetrieveStatus::Error(other.to_string()),
        }
    }

    /// Returns true if the result set is complete.
    pub fn is_ok(&self) -> bool {
        matches!(self, RetrieveStatus::Ok)
    }

    /// Returns true if more pages remain.
    pub fn has_more(&self) -> bool {
        matches!(self, RetrieveStatus::MorePages)
    }
}

/// An ordered sequence of records plus the paging state of the retrieve.
///
/// Invariant: when `status` is [`RetrieveStatus::Ok`] the sequence is
/// complete and `continue_request` is `None`. A `MorePages` status without a
/// continuation token terminates any drain loop early with the partial
/// result rather than looping forever.
#[derive(Debug, Clone)]
pub struct RetrieveResult {
    /// The records, in server order.
    pub records: Vec<Record>,
    /// Paging status.
    pub status: RetrieveStatus,
    /// SOAP continuation token for requesting the next page.
    pub continue_request: Option<String>,
}

impl RetrieveResult {
    /// A complete result set with no further pages.
    pub fn complete(records: Vec<Record>) -> Self {
        Self {
            records,
            status: RetrieveStatus::Ok,
            continue_request: None,
        }
    }

    /// Number of records in this result.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were returned.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// String value of a top-level field of each record, where present.
    pub fn field_values(&self, field: &str) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|r| r.get(field).and_then(|v| v.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_overall_status() {
        assert_eq!(
            RetrieveStatus::from_overall_status("OK"),
            RetrieveStatus::Ok
        );
        assert_eq!(
            RetrieveStatus::from_overall_status("MoreDataAvailable"),
            RetrieveStatus::MorePages
        );
        assert_eq!(
            RetrieveStatus::from_overall_status("Error: request failed"),
            RetrieveStatus::Error("Error: request failed".to_string())
        );
    }

    #[test]
    fn test_complete_result() {
        let mut record = Record::new();
        record.insert("Name".to_string(), serde_json::json!("Welcome"));
        let result = RetrieveResult::complete(vec![record]);

        assert_eq!(result.len(), 1);
        assert!(!result.is_empty());
        assert!(result.status.is_ok());
        assert!(result.continue_request.is_none());
    }

    #[test]
    fn test_field_values_skips_missing_and_non_string() {
        let records: Vec<Record> = [
            serde_json::json!({"name": "A", "id": 1}),
            serde_json::json!({"id": 2}),
            serde_json::json!({"name": "B"}),
            serde_json::json!({"name": 42}),
        ]
        .into_iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect();

        let result = RetrieveResult::complete(records);
        assert_eq!(result.field_values("name"), vec!["A", "B"]);
    }
}
