//! # sfmc-client
//!
//! Core HTTP client infrastructure for Salesforce Marketing Cloud APIs.
//!
//! This crate provides the foundational HTTP client shared by the protocol
//! adapter crates:
//! - Connection pooling and per-request timeouts
//! - Query building with scalar and list values (lists are comma-joined)
//! - Marketing Cloud error payload surfacing
//! - Request/response tracing
//!
//! There is intentionally no retry or backoff layer: every transport failure
//! and non-2xx response propagates immediately to the caller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (sfmc-rest, sfmc-soap, sfmc-migrate)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     McHttpClient                            │
//! │  - Raw HTTP with pooling and timeouts                       │
//! │  - Request building (bearer auth, query values, JSON body)  │
//! │  - Error payload detection                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod result;

pub use client::McHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{QueryValue, RequestBuilder, RequestMethod};
pub use response::Response;
pub use result::{Record, RetrieveResult, RetrieveStatus};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sfmc-api/", env!("CARGO_PKG_VERSION"));
