//! # sfmc-rest
//!
//! Marketing Cloud REST resource service client.
//!
//! Wraps [`McHttpClient`](sfmc_client::McHttpClient) with bearer
//! authentication from a shared [`TokenManager`](sfmc_auth::TokenManager)
//! and the platform's paging conventions (`$page`, `$pagesize`, `$fields`,
//! `$orderBy`, `$filter`). [`RestClient::get`] can drain every page of a
//! collection into one [`RetrieveResult`](sfmc_client::RetrieveResult).

mod client;
mod error;
mod params;

pub use client::RestClient;
pub use error::{Error, ErrorKind, Result};
pub use params::QueryParams;

/// Page size used when the caller does not supply `$pagesize`.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
