//! REST resource service client.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use sfmc_auth::TokenManager;
use sfmc_client::{ClientConfig, McHttpClient, Record, RetrieveResult};

use crate::error::Result;
use crate::params::QueryParams;

/// Marketing Cloud REST resource service client.
///
/// Cloning is cheap; clones share the token manager and connection pool.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    tokens: Arc<TokenManager>,
    http: McHttpClient,
}

impl RestClient {
    /// Create a new REST client against the given base URL.
    pub fn new(base_url: impl Into<String>, tokens: Arc<TokenManager>) -> Result<Self> {
        Self::with_config(base_url, tokens, ClientConfig::default())
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        tokens: Arc<TokenManager>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = McHttpClient::new(config)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
            http,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a resource path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a resource, optionally draining every page.
    ///
    /// A body carrying an `items` list becomes a result over those items; a
    /// body without one becomes a single-record result (use
    /// [`get_raw`](Self::get_raw) for the undecorated body).
    ///
    /// With `drain_all = true`, pages are fetched starting from the
    /// caller-supplied `$page` (default 1) until a page yields no items, the
    /// body carries no `count`, or the reported count is exhausted. The loop
    /// issues at most `ceil(count / pagesize)` requests.
    #[instrument(skip(self, params))]
    pub async fn get(
        &self,
        path: &str,
        params: &QueryParams,
        drain_all: bool,
    ) -> Result<RetrieveResult> {
        let starting_page = params.starting_page();
        let page_size = params.effective_page_size();

        let mut page = starting_page;
        let mut records: Vec<Record> = Vec::new();

        loop {
            let body = if page == starting_page {
                self.get_raw(path, params).await?
            } else {
                self.get_raw(path, &params.clone().page(page)).await?
            };

            let Some(items) = body.get("items").and_then(serde_json::Value::as_array) else {
                if records.is_empty() {
                    return Ok(RetrieveResult::complete(vec![into_record(body)]));
                }
                break;
            };

            let fetched = items.len();
            records.extend(items.iter().filter_map(|v| v.as_object().cloned()));
            debug!(page, fetched, total = records.len(), "Fetched page");

            if !drain_all || fetched == 0 {
                break;
            }

            match body.get("count").and_then(serde_json::Value::as_u64) {
                Some(count) if count > u64::from(page) * u64::from(page_size) => page += 1,
                _ => break,
            }
        }

        Ok(RetrieveResult::complete(records))
    }

    /// GET a resource and return the decoded body verbatim.
    #[instrument(skip(self, params))]
    pub async fn get_raw(&self, path: &str, params: &QueryParams) -> Result<serde_json::Value> {
        let token = self.tokens.token().await?;
        let request = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .queries(params.entries().map(|(k, v)| (k.to_string(), v.clone())));
        self.http.execute_json(request).await.map_err(Into::into)
    }

    /// POST a JSON body and return the decoded response body.
    #[instrument(skip(self, body))]
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<serde_json::Value> {
        let token = self.tokens.token().await?;
        let request = self.http.post(self.url(path)).bearer_auth(token).json(body)?;
        self.http.execute_json(request).await.map_err(Into::into)
    }

    /// PATCH a JSON body and return the decoded response body.
    #[instrument(skip(self, body))]
    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> Result<serde_json::Value> {
        let token = self.tokens.token().await?;
        let request = self.http.patch(self.url(path)).bearer_auth(token).json(body)?;
        self.http.execute_json(request).await.map_err(Into::into)
    }

    /// PUT a JSON body and return the decoded response body.
    #[instrument(skip(self, body))]
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<serde_json::Value> {
        let token = self.tokens.token().await?;
        let request = self.http.put(self.url(path)).bearer_auth(token).json(body)?;
        self.http.execute_json(request).await.map_err(Into::into)
    }

    /// DELETE a resource and return the response status code.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<u16> {
        let token = self.tokens.token().await?;
        let request = self.http.delete(self.url(path)).bearer_auth(token);
        let response = self.http.execute(request).await?;
        Ok(response.status())
    }
}

/// Wrap a decoded body as a single record.
fn into_record(body: serde_json::Value) -> Record {
    match body {
        serde_json::Value::Object(map) => map,
        other => {
            let mut record = Record::new();
            record.insert("value".to_string(), other);
            record
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use sfmc_auth::ClientCredentials;

    async fn rest_fixture(mock_server: &MockServer) -> RestClient {
        Mock::given(method("POST"))
            .and(path("/v2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "expires_in": 3600
            })))
            .mount(mock_server)
            .await;

        let tokens = Arc::new(TokenManager::new(ClientCredentials::new(
            "id",
            "secret",
            mock_server.uri(),
        )));
        RestClient::new(mock_server.uri(), tokens).unwrap()
    }

    fn asset_page(names: &[&str], count: u64) -> serde_json::Value {
        serde_json::json!({
            "count": count,
            "items": names.iter().map(|n| serde_json::json!({"name": n})).collect::<Vec<_>>()
        })
    }

    #[tokio::test]
    async fn test_get_attaches_bearer_token() {
        let mock_server = MockServer::start().await;
        let client = rest_fixture(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/asset/v1/content/assets"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(asset_page(&["A"], 1)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client
            .get("asset/v1/content/assets", &QueryParams::new(), false)
            .await
            .unwrap();
        assert_eq!(result.field_values("name"), vec!["A"]);
    }

    #[tokio::test]
    async fn test_drain_concatenates_all_pages() {
        let mock_server = MockServer::start().await;
        let client = rest_fixture(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/automation/v1/automations"))
            .and(query_param("$page", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(asset_page(&["C", "D"], 5)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/automation/v1/automations"))
            .and(query_param("$page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_page(&["E"], 5)))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/automation/v1/automations"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(asset_page(&["A", "B"], 5)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let params = QueryParams::new().page(1).page_size(2);
        let result = client
            .get("automation/v1/automations", &params, true)
            .await
            .unwrap();

        // ceil(5 / 2) = 3 requests, all pages concatenated in order.
        assert_eq!(result.field_values("name"), vec!["A", "B", "C", "D", "E"]);
    }

    #[tokio::test]
    async fn test_drain_stops_on_empty_page() {
        let mock_server = MockServer::start().await;
        let client = rest_fixture(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/automation/v1/automations"))
            .and(query_param("$page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_page(&[], 100)))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/automation/v1/automations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_page(&["A"], 100)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let params = QueryParams::new().page_size(1);
        let result = client
            .get("automation/v1/automations", &params, true)
            .await
            .unwrap();

        assert_eq!(result.field_values("name"), vec!["A"]);
    }

    #[tokio::test]
    async fn test_drain_stops_without_count_field() {
        let mock_server = MockServer::start().await;
        let client = rest_fixture(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/platform/v1/endpoints"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{"name": "A"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client
            .get("platform/v1/endpoints", &QueryParams::new(), true)
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_body_without_items_becomes_single_record() {
        let mock_server = MockServer::start().await;
        let client = rest_fixture(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/automation/v1/automations/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "abc",
                "name": "Nightly"
            })))
            .mount(&mock_server)
            .await;

        let result = client
            .get("automation/v1/automations/abc", &QueryParams::new(), false)
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0]["name"], "Nightly");
    }

    #[tokio::test]
    async fn test_get_raw_returns_body_verbatim() {
        let mock_server = MockServer::start().await;
        let client = rest_fixture(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/asset/v1/content/assets/42/file"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!("aGVsbG8=")),
            )
            .mount(&mock_server)
            .await;

        let body = client
            .get_raw("asset/v1/content/assets/42/file", &QueryParams::new())
            .await
            .unwrap();
        assert_eq!(body, serde_json::json!("aGVsbG8="));
    }

    #[tokio::test]
    async fn test_post_returns_decoded_body() {
        let mock_server = MockServer::start().await;
        let client = rest_fixture(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/asset/v1/content/assets"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 99,
                "name": "Copied"
            })))
            .mount(&mock_server)
            .await;

        let body = client
            .post(
                "/asset/v1/content/assets",
                &serde_json::json!({"name": "Copied"}),
            )
            .await
            .unwrap();
        assert_eq!(body["id"], 99);
    }

    #[tokio::test]
    async fn test_delete_returns_status_code() {
        let mock_server = MockServer::start().await;
        let client = rest_fixture(&mock_server).await;

        Mock::given(method("DELETE"))
            .and(path("/asset/v1/content/assets/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let status = client.delete("asset/v1/content/assets/7").await.unwrap();
        assert_eq!(status, 204);
    }

    #[tokio::test]
    async fn test_api_error_surfaces() {
        let mock_server = MockServer::start().await;
        let client = rest_fixture(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/asset/v1/content/assets"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Category not found",
                "errorcode": 118039
            })))
            .mount(&mock_server)
            .await;

        let err = client
            .get("asset/v1/content/assets", &QueryParams::new(), false)
            .await
            .unwrap_err();

        match err.kind {
            crate::ErrorKind::Client(inner) => {
                assert!(matches!(inner.kind, sfmc_client::ErrorKind::Api { .. }));
            }
            other => panic!("unexpected error kind: {other}"),
        }
    }
}
