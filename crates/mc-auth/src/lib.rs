//! # sfmc-auth
//!
//! Marketing Cloud authentication: the OAuth 2.0 client-credentials grant
//! and the token lifecycle around it.
//!
//! The [`TokenManager`] owns the short-lived bearer token. Callers ask for
//! the current value once per outgoing request via [`TokenManager::token`];
//! an expired (or absent) token triggers exactly one credential exchange,
//! coalesced across concurrent callers.
//!
//! ## Security
//!
//! - `client_secret` and token values are redacted in Debug output
//! - Error messages avoid echoing credential data

mod credentials;
mod error;
mod token;

pub use credentials::ClientCredentials;
pub use error::{Error, ErrorKind, Result};
pub use token::TokenManager;
