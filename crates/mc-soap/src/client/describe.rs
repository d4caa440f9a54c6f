//! Describe operation: object type property discovery.

use tracing::instrument;

use super::xml_helpers::{extract_blocks, extract_element, xml};
use crate::error::{Error, ErrorKind, Result};
use crate::types::PropertyDescription;

impl super::SoapClient {
    /// Describe an object type, returning its property definitions.
    #[instrument(skip(self))]
    pub async fn describe(&self, object_type: &str) -> Result<Vec<PropertyDescription>> {
        let body = format!(
            "<DefinitionRequestMsg xmlns=\"{ns}\">\n      <DescribeRequests>\n        <ObjectDefinitionRequest>\n          <ObjectType>{object_type}</ObjectType>\n        </ObjectDefinitionRequest>\n      </DescribeRequests>\n    </DefinitionRequestMsg>",
            ns = Self::partner_ns(),
            object_type = xml::escape(object_type),
        );

        let response = self.dispatch("Describe", &body).await?;
        parse_describe_response(&response, object_type)
    }
}

/// Parse a `DefinitionResponseMsg` into property descriptions.
fn parse_describe_response(
    xml_text: &str,
    object_type: &str,
) -> Result<Vec<PropertyDescription>> {
    // An unknown object type yields a definition without an ObjectType echo.
    if extract_element(xml_text, "ObjectType").is_none() {
        return Err(Error::new(ErrorKind::InvalidResponse(format!(
            "No definition returned for {}",
            object_type
        ))));
    }

    let properties = extract_blocks(xml_text, "Properties")
        .iter()
        .filter_map(|block| {
            let name = extract_element(block, "Name")?;
            Some(PropertyDescription {
                name,
                is_retrievable: extract_element(block, "IsRetrievable")
                    .map(|v| v == "true")
                    .unwrap_or(false),
                is_updatable: extract_element(block, "IsUpdatable")
                    .map(|v| v == "true")
                    .unwrap_or(false),
            })
        })
        .collect();

    Ok(properties)
}
