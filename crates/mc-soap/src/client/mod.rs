//! SOAP object service client.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use sfmc_auth::TokenManager;

use crate::error::{Error, ErrorKind, Result};
use crate::{FUEL_NS, PARTNER_NS};

mod crud;
mod describe;
mod retrieve;
mod xml_helpers;

use xml_helpers::xml;

/// SOAP Action header name.
static SOAP_ACTION_HEADER: HeaderName = HeaderName::from_static("soapaction");

/// Marketing Cloud SOAP object service client.
///
/// Cloning is cheap; clones share the token manager.
#[derive(Debug, Clone)]
pub struct SoapClient {
    endpoint: String,
    tokens: Arc<TokenManager>,
    http: reqwest::Client,
}

impl SoapClient {
    /// Create a new SOAP client against the given service endpoint.
    pub fn new(endpoint: impl Into<String>, tokens: Arc<TokenManager>) -> Self {
        Self {
            endpoint: endpoint.into(),
            tokens,
            http: reqwest::Client::new(),
        }
    }

    /// Set a custom HTTP client.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Get the service endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build common headers for SOAP requests.
    pub(crate) fn build_headers(&self, soap_action: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/xml;charset=UTF-8"),
        );
        if let Ok(value) = HeaderValue::from_str(soap_action) {
            headers.insert(SOAP_ACTION_HEADER.clone(), value);
        }
        headers
    }

    /// Wrap a request body in an envelope carrying the addressing headers
    /// and the `fueloauth` authentication element.
    pub(crate) fn build_envelope(&self, action: &str, token: &str, body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" xmlns:a="http://schemas.xmlsoap.org/ws/2004/08/addressing" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <s:Header>
    <a:Action s:mustUnderstand="1">{action}</a:Action>
    <a:To s:mustUnderstand="1">{endpoint}</a:To>
    <fueloauth xmlns="{fuel_ns}">{token}</fueloauth>
  </s:Header>
  <s:Body>
    {body}
  </s:Body>
</s:Envelope>"#,
            action = action,
            endpoint = xml::escape(&self.endpoint),
            fuel_ns = FUEL_NS,
            token = xml::escape(token),
            body = body,
        )
    }

    /// Send one operation to the service and return the raw response XML.
    ///
    /// The current token is fetched per call, so callers transparently pick
    /// up refreshes. SOAP faults surface as errors before status handling.
    pub(crate) async fn dispatch(&self, action: &str, body: &str) -> Result<String> {
        let token = self.tokens.token().await?;
        let envelope = self.build_envelope(action, &token, body);

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.build_headers(action))
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if let Some(fault) = xml_helpers::parse_soap_fault(&text) {
            return Err(Error::new(ErrorKind::SoapFault(fault.to_string())));
        }

        if !status.is_success() {
            let mut message = text;
            message.truncate(256);
            return Err(Error::new(ErrorKind::Http {
                status: status.as_u16(),
                message,
            }));
        }

        Ok(text)
    }

    /// Namespace used by request bodies.
    pub(crate) fn partner_ns() -> &'static str {
        PARTNER_NS
    }
}
