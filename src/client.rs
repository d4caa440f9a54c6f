//! The unified client facade.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use sfmc_auth::{ClientCredentials, TokenManager};
use sfmc_catalog::Catalog;
use sfmc_migrate::Migrator;
use sfmc_rest::{QueryParams, RestClient};
use sfmc_soap::SoapClient;

use crate::config::MarketingConfig;
use crate::error::Result;

/// Resource path of the Content Builder asset collection.
const ASSETS_PATH: &str = "asset/v1/content/assets";

/// Unified client over both API surfaces.
///
/// One [`TokenManager`] backs both adapters, so a token refresh on either
/// path is visible to the other.
#[derive(Debug, Clone)]
pub struct MarketingClient {
    tokens: Arc<TokenManager>,
    soap: SoapClient,
    rest: RestClient,
}

impl MarketingClient {
    /// Create a client from a configuration.
    pub fn new(config: MarketingConfig) -> Result<Self> {
        let mut credentials = ClientCredentials::new(
            &config.client_id,
            config.client_secret(),
            &config.auth_url,
        );
        if let Some(account_id) = &config.account_id {
            credentials = credentials.with_account_id(account_id);
        }

        let tokens = Arc::new(TokenManager::new(credentials));
        let soap = SoapClient::new(&config.soap_url, tokens.clone());
        let rest = RestClient::new(&config.rest_url, tokens.clone())?;

        Ok(Self { tokens, soap, rest })
    }

    /// Create a client configured from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(MarketingConfig::from_env()?)
    }

    /// The SOAP object service adapter.
    pub fn soap(&self) -> &SoapClient {
        &self.soap
    }

    /// The REST resource service adapter.
    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// The shared token manager.
    pub fn token_manager(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Build a migration engine over this client and a catalog.
    pub fn migrator(&self, catalog: Catalog) -> Migrator {
        Migrator::new(self.soap.clone(), self.rest.clone(), catalog)
    }

    /// Copy Content Builder assets of one type between folders.
    ///
    /// Fetches up to 1000 assets of `asset_type` from the source folder and
    /// posts each under the destination folder, letting the server assign
    /// new identities. Unlike the migration engine's REST path this does
    /// not diff against the destination, so repeated calls can create
    /// duplicates. Returns the number of assets copied.
    #[instrument(skip(self))]
    pub async fn copy_assets(
        &self,
        source_folder: &str,
        dest_folder: &str,
        asset_type: &str,
    ) -> Result<usize> {
        let params = QueryParams::new().page(1).page_size(1000).filter(format!(
            "assetType.name={} AND category.id={}",
            asset_type, source_folder
        ));

        let assets = self.rest.get(ASSETS_PATH, &params, true).await?;
        info!(
            asset_type,
            source_folder,
            count = assets.len(),
            "Fetched assets to copy"
        );

        let mut copied = 0;
        for asset in &assets.records {
            let payload = serde_json::json!({
                "name": asset.get("name").cloned().unwrap_or(serde_json::Value::Null),
                "assetType": asset.get("assetType").cloned().unwrap_or(serde_json::Value::Null),
                "category": { "id": dest_folder },
                "views": asset.get("views").cloned().unwrap_or_else(|| serde_json::json!({})),
                "content": asset.get("content").cloned().unwrap_or_else(|| serde_json::json!({})),
            });

            debug!(name = %payload["name"], "Copying asset");
            self.rest.post(ASSETS_PATH, &payload).await?;
            copied += 1;
        }

        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_fixture(mock_server: &MockServer) -> MarketingClient {
        Mock::given(method("POST"))
            .and(path("/v2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "expires_in": 3600
            })))
            .mount(mock_server)
            .await;

        let config = MarketingConfig::new(
            "id",
            "secret",
            mock_server.uri(),
            mock_server.uri(),
            format!("{}/Service.asmx", mock_server.uri()),
        );
        MarketingClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_copy_assets_filters_by_type_and_folder() {
        let mock_server = MockServer::start().await;
        let client = client_fixture(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/asset/v1/content/assets"))
            .and(query_param("$pagesize", "1000"))
            .and(query_param(
                "$filter",
                "assetType.name=templatebasedemail AND category.id=10",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 2,
                "items": [
                    {"name": "A", "assetType": {"name": "templatebasedemail"}, "views": {"html": {}}},
                    {"name": "B", "assetType": {"name": "templatebasedemail"}}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/asset/v1/content/assets"))
            .and(body_partial_json(serde_json::json!({
                "category": {"id": "20"}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 1})))
            .expect(2)
            .mount(&mock_server)
            .await;

        let copied = client
            .copy_assets("10", "20", "templatebasedemail")
            .await
            .unwrap();
        assert_eq!(copied, 2);
    }

    #[tokio::test]
    async fn test_copy_assets_does_not_deduplicate() {
        let mock_server = MockServer::start().await;
        let client = client_fixture(&mock_server).await;

        // The destination already holds an asset named "A"; it is copied
        // again regardless.
        Mock::given(method("GET"))
            .and(path("/asset/v1/content/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "items": [{"name": "A", "assetType": {"name": "textblock"}}]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/asset/v1/content/assets"))
            .and(body_partial_json(serde_json::json!({"name": "A"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 2})))
            .expect(2)
            .mount(&mock_server)
            .await;

        assert_eq!(client.copy_assets("10", "20", "textblock").await.unwrap(), 1);
        assert_eq!(client.copy_assets("10", "20", "textblock").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_copy_assets_with_empty_source() {
        let mock_server = MockServer::start().await;
        let client = client_fixture(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/asset/v1/content/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 0,
                "items": []
            })))
            .mount(&mock_server)
            .await;

        assert_eq!(client.copy_assets("10", "20", "png").await.unwrap(), 0);
    }
}
