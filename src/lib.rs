//! # sfmc-api
//!
//! A Salesforce Marketing Cloud API client library for Rust.
//!
//! The platform exposes two parallel API surfaces: a SOAP object service
//! and a REST resource service. This library puts one client in front of
//! both, with a shared token lifecycle, exhaustive pagination on either
//! protocol, and a folder-to-folder migration engine on top.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets) are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages avoid echoing credential data
//!
//! ## Crates
//!
//! - **sfmc-client** - Core HTTP infrastructure and the shared result model
//! - **sfmc-auth** - Client-credentials grant and token lifecycle
//! - **sfmc-soap** - SOAP object service: CRUD, retrieve with drain, describe
//! - **sfmc-rest** - REST resource service with `$page`-based pagination
//! - **sfmc-catalog** - Externally supplied object catalog
//! - **sfmc-migrate** - Folder-to-folder migration engine
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sfmc_api::{Catalog, MarketingClient, MarketingConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketingClient::new(MarketingConfig::from_env()?)?;
//!
//!     // Drain every query definition over SOAP
//!     let queries = client
//!         .soap()
//!         .retrieve("QueryDefinition", &["Name".into()], None, true)
//!         .await?;
//!     println!("{} query definitions", queries.len());
//!
//!     // Migrate a folder of assets
//!     let catalog = Catalog::from_file("catalog.json")?;
//!     let report = client
//!         .migrator(catalog)
//!         .migrate_folder("Asset", "12345", "67890")
//!         .await?;
//!     println!("copied {}, skipped {}", report.copied, report.skipped);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;

pub use client::MarketingClient;
pub use config::MarketingConfig;
pub use error::{Error, ErrorKind, Result};

// Re-export all crates for convenient access
pub use sfmc_auth as auth;
pub use sfmc_catalog as catalog;
pub use sfmc_migrate as migrate;
pub use sfmc_rest as rest;
pub use sfmc_soap as soap;

// Re-export commonly used types at the top level
pub use sfmc_auth::{ClientCredentials, TokenManager};
pub use sfmc_catalog::{Catalog, CatalogEntry, Protocol, RestVerb};
pub use sfmc_client::{ClientConfig, Record, RetrieveResult, RetrieveStatus};
pub use sfmc_migrate::{MigrationReport, Migrator};
pub use sfmc_rest::{QueryParams, RestClient};
pub use sfmc_soap::{FilterOperator, SimpleFilter, SoapClient};
