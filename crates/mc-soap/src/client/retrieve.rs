//! Retrieve operation and the continuation-token drain loop.

use tracing::{debug, instrument, warn};

use sfmc_client::{Record, RetrieveResult, RetrieveStatus};

use super::xml_helpers::{extract_blocks, extract_element, parse_record, xml};
use crate::error::{Error, ErrorKind, Result};
use crate::types::SimpleFilter;

/// One page of a retrieve response.
#[derive(Debug)]
struct RetrievePage {
    records: Vec<Record>,
    overall_status: String,
    request_id: Option<String>,
}

impl super::SoapClient {
    /// Retrieve objects of a type.
    ///
    /// With `drain_all = false` the first page is returned verbatim,
    /// including its paging status and continuation token. With
    /// `drain_all = true` every page is fetched and appended; the returned
    /// status is normalized to `Ok`. If the service reports more data but
    /// supplies no continuation token, draining stops with the partial
    /// result rather than looping forever.
    #[instrument(skip(self, properties, filter))]
    pub async fn retrieve(
        &self,
        object_type: &str,
        properties: &[String],
        filter: Option<&SimpleFilter>,
        drain_all: bool,
    ) -> Result<RetrieveResult> {
        let mut page = self
            .retrieve_page(object_type, properties, filter, None)
            .await?;

        if !drain_all {
            let status = RetrieveStatus::from_overall_status(&page.overall_status);
            let continue_request = if status.has_more() {
                page.request_id
            } else {
                None
            };
            return Ok(RetrieveResult {
                records: page.records,
                status,
                continue_request,
            });
        }

        let mut records = std::mem::take(&mut page.records);

        loop {
            match RetrieveStatus::from_overall_status(&page.overall_status) {
                RetrieveStatus::Ok => break,
                RetrieveStatus::MorePages => {
                    let Some(request_id) = page.request_id.take() else {
                        warn!(
                            object_type,
                            fetched = records.len(),
                            "Server reported more data without a continuation token; \
                             returning partial results"
                        );
                        break;
                    };
                    debug!(object_type, fetched = records.len(), "Fetching next batch");
                    page = self
                        .retrieve_page(object_type, properties, filter, Some(&request_id))
                        .await?;
                    records.append(&mut page.records);
                }
                RetrieveStatus::Error(status) => {
                    return Err(Error::new(ErrorKind::Status(status)));
                }
            }
        }

        Ok(RetrieveResult::complete(records))
    }

    /// Issue a single retrieve request and parse one page.
    async fn retrieve_page(
        &self,
        object_type: &str,
        properties: &[String],
        filter: Option<&SimpleFilter>,
        continue_request: Option<&str>,
    ) -> Result<RetrievePage> {
        let body = build_retrieve_body(object_type, properties, filter, continue_request);
        let response = self.dispatch("Retrieve", &body).await?;
        parse_retrieve_response(&response)
    }
}

/// Build the `RetrieveRequestMsg` body.
fn build_retrieve_body(
    object_type: &str,
    properties: &[String],
    filter: Option<&SimpleFilter>,
    continue_request: Option<&str>,
) -> String {
    let mut request = String::new();
    request.push_str(&format!(
        "        <ObjectType>{}</ObjectType>\n",
        xml::escape(object_type)
    ));
    for property in properties {
        request.push_str(&format!(
            "        <Properties>{}</Properties>\n",
            xml::escape(property)
        ));
    }
    if let Some(filter) = filter {
        request.push_str(&format!(
            "        <Filter xsi:type=\"SimpleFilterPart\">\n          <Property>{}</Property>\n          <SimpleOperator>{}</SimpleOperator>\n          <Value>{}</Value>\n        </Filter>\n",
            xml::escape(&filter.property),
            filter.operator.as_str(),
            xml::escape(&filter.value)
        ));
    }
    if let Some(token) = continue_request {
        request.push_str(&format!(
            "        <ContinueRequest>{}</ContinueRequest>\n",
            xml::escape(token)
        ));
    }

    format!(
        "<RetrieveRequestMsg xmlns=\"{}\">\n      <RetrieveRequest>\n{}      </RetrieveRequest>\n    </RetrieveRequestMsg>",
        super::SoapClient::partner_ns(),
        request
    )
}

/// Parse a `RetrieveResponseMsg`.
fn parse_retrieve_response(xml_text: &str) -> Result<RetrievePage> {
    let overall_status = extract_element(xml_text, "OverallStatus").ok_or_else(|| {
        Error::new(ErrorKind::InvalidResponse("Missing OverallStatus".to_string()))
    })?;

    let request_id = extract_element(xml_text, "RequestID").filter(|id| !id.is_empty());

    let records = extract_blocks(xml_text, "Results")
        .iter()
        .map(|block| parse_record(block))
        .collect();

    Ok(RetrievePage {
        records,
        overall_status,
        request_id,
    })
}
