//! Create/Update/Delete operations.

use tracing::instrument;

use super::xml_helpers::{extract_blocks, extract_element, xml};
use crate::error::{Error, ErrorKind, Result};
use crate::types::OperationResult;

impl super::SoapClient {
    /// Create an object of the given type from a property map.
    #[instrument(skip(self, properties))]
    pub async fn create(
        &self,
        object_type: &str,
        properties: &serde_json::Value,
    ) -> Result<OperationResult> {
        self.modify("Create", "CreateRequest", object_type, properties)
            .await
    }

    /// Update an existing object of the given type.
    #[instrument(skip(self, properties))]
    pub async fn update(
        &self,
        object_type: &str,
        properties: &serde_json::Value,
    ) -> Result<OperationResult> {
        self.modify("Update", "UpdateRequest", object_type, properties)
            .await
    }

    /// Delete an object of the given type.
    #[instrument(skip(self, properties))]
    pub async fn delete(
        &self,
        object_type: &str,
        properties: &serde_json::Value,
    ) -> Result<OperationResult> {
        self.modify("Delete", "DeleteRequest", object_type, properties)
            .await
    }

    async fn modify(
        &self,
        action: &str,
        request_tag: &str,
        object_type: &str,
        properties: &serde_json::Value,
    ) -> Result<OperationResult> {
        let body = format!(
            "<{tag} xmlns=\"{ns}\">\n{object}    </{tag}>",
            tag = request_tag,
            ns = Self::partner_ns(),
            object = build_object_element(object_type, properties),
        );

        let response = self.dispatch(action, &body).await?;
        parse_operation_result(&response)
    }
}

/// Render a property map as an `<Objects>` element of the given type.
pub(crate) fn build_object_element(object_type: &str, properties: &serde_json::Value) -> String {
    let mut element = format!("      <Objects xsi:type=\"{}\">\n", xml::escape(object_type));

    if let serde_json::Value::Object(map) = properties {
        for (name, value) in map {
            element.push_str(&build_xml_field(name, value, 8));
        }
    }

    element.push_str("      </Objects>\n");
    element
}

/// Render one field of an object, recursing into nested maps and repeating
/// elements for arrays. `null` renders as `xsi:nil`.
pub(crate) fn build_xml_field(name: &str, value: &serde_json::Value, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let name = xml::escape(name);

    match value {
        serde_json::Value::Null => format!("{pad}<{name} xsi:nil=\"true\"/>\n"),
        serde_json::Value::String(s) => {
            format!("{pad}<{name}>{}</{name}>\n", xml::escape(s))
        }
        serde_json::Value::Bool(b) => format!("{pad}<{name}>{b}</{name}>\n"),
        serde_json::Value::Number(n) => format!("{pad}<{name}>{n}</{name}>\n"),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| build_xml_field(&name, item, indent))
            .collect(),
        serde_json::Value::Object(map) => {
            let mut nested = format!("{pad}<{name}>\n");
            for (child, child_value) in map {
                nested.push_str(&build_xml_field(child, child_value, indent + 2));
            }
            nested.push_str(&format!("{pad}</{name}>\n"));
            nested
        }
    }
}

/// Parse a Create/Update/Delete response into an [`OperationResult`].
fn parse_operation_result(xml_text: &str) -> Result<OperationResult> {
    let overall_status = extract_element(xml_text, "OverallStatus").ok_or_else(|| {
        Error::new(ErrorKind::InvalidResponse("Missing OverallStatus".to_string()))
    })?;

    let result_block = extract_blocks(xml_text, "Results").into_iter().next();

    let (status_code, status_message, new_id) = match result_block {
        Some(block) => (
            extract_element(&block, "StatusCode").unwrap_or_else(|| overall_status.clone()),
            extract_element(&block, "StatusMessage"),
            extract_element(&block, "NewID").filter(|id| !id.is_empty() && id != "0"),
        ),
        None => (overall_status.clone(), None, None),
    };

    Ok(OperationResult {
        overall_status,
        status_code,
        status_message,
        new_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_object_element() {
        let properties = serde_json::json!({
            "Name": "Nightly Sync",
            "CategoryID": "1234",
            "TargetUpdateType": "Overwrite"
        });

        let element = build_object_element("QueryDefinition", &properties);
        assert!(element.contains("<Objects xsi:type=\"QueryDefinition\">"));
        assert!(element.contains("<Name>Nightly Sync</Name>"));
        assert!(element.contains("<CategoryID>1234</CategoryID>"));
        assert!(element.contains("<TargetUpdateType>Overwrite</TargetUpdateType>"));
    }

    #[test]
    fn test_build_object_element_escapes_values() {
        let properties = serde_json::json!({
            "Name": "A <&> B"
        });
        let element = build_object_element("DataExtension", &properties);
        assert!(element.contains("<Name>A &lt;&amp;&gt; B</Name>"));
    }

    #[test]
    fn test_build_xml_field_scalars() {
        assert_eq!(
            build_xml_field("Name", &serde_json::json!("value"), 4),
            "    <Name>value</Name>\n"
        );
        assert_eq!(
            build_xml_field("Count", &serde_json::json!(42), 4),
            "    <Count>42</Count>\n"
        );
        assert_eq!(
            build_xml_field("IsActive", &serde_json::json!(true), 4),
            "    <IsActive>true</IsActive>\n"
        );
        assert_eq!(
            build_xml_field("Description", &serde_json::Value::Null, 4),
            "    <Description xsi:nil=\"true\"/>\n"
        );
    }

    #[test]
    fn test_build_xml_field_nested() {
        let value = serde_json::json!({"Name": "Target"});
        let field = build_xml_field("DataExtensionTarget", &value, 4);
        assert!(field.contains("    <DataExtensionTarget>\n"));
        assert!(field.contains("      <Name>Target</Name>\n"));
        assert!(field.contains("    </DataExtensionTarget>\n"));
    }

    #[test]
    fn test_build_xml_field_array_repeats_element() {
        let value = serde_json::json!([{"Name": "F1"}, {"Name": "F2"}]);
        let field = build_xml_field("Fields", &value, 4);
        assert_eq!(field.matches("<Fields>").count(), 2);
        assert!(field.contains("<Name>F1</Name>"));
        assert!(field.contains("<Name>F2</Name>"));
    }

    #[test]
    fn test_parse_operation_result() {
        let xml_text = r#"
            <CreateResponse xmlns="http://exacttarget.com/wsdl/partnerAPI">
                <Results>
                    <StatusCode>OK</StatusCode>
                    <StatusMessage>Query Definition Created</StatusMessage>
                    <NewID>5678</NewID>
                </Results>
                <RequestID>req-1</RequestID>
                <OverallStatus>OK</OverallStatus>
            </CreateResponse>
        "#;

        let result = parse_operation_result(xml_text).unwrap();
        assert_eq!(result.overall_status, "OK");
        assert!(result.is_ok());
        assert_eq!(
            result.status_message,
            Some("Query Definition Created".to_string())
        );
        assert_eq!(result.new_id, Some("5678".to_string()));
    }

    #[test]
    fn test_parse_operation_result_error() {
        let xml_text = r#"
            <CreateResponse>
                <Results>
                    <StatusCode>Error</StatusCode>
                    <StatusMessage>Name already in use</StatusMessage>
                    <NewID>0</NewID>
                </Results>
                <OverallStatus>Error</OverallStatus>
            </CreateResponse>
        "#;

        let result = parse_operation_result(xml_text).unwrap();
        assert!(!result.is_ok());
        assert_eq!(result.new_id, None);
        assert_eq!(result.status_message, Some("Name already in use".to_string()));
    }

    #[test]
    fn test_parse_operation_result_without_results_block() {
        let result =
            parse_operation_result("<DeleteResponse><OverallStatus>OK</OverallStatus></DeleteResponse>")
                .unwrap();
        assert_eq!(result.status_code, "OK");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_operation_result_missing_status() {
        let err = parse_operation_result("<CreateResponse/>").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidResponse(_)));
    }
}
