//! # sfmc-soap
//!
//! Marketing Cloud SOAP object service client.
//!
//! Operations map one-to-one onto the wire protocol: `Create`, `Retrieve`
//! (with optional exhaustive draining over continuation tokens), `Update`,
//! `Delete`, and `Describe`. Every call fetches the current bearer token
//! from the shared [`TokenManager`](sfmc_auth::TokenManager) and embeds it
//! in the SOAP header as the `fueloauth` element.
//!
//! Envelopes are built as XML text and responses are parsed by element
//! scanning; the service's response vocabulary is small and flat enough
//! that a full XML stack buys nothing here.

mod client;
mod error;
mod types;

pub use client::SoapClient;
pub use error::{Error, ErrorKind, Result};
pub use types::{FilterOperator, OperationResult, PropertyDescription, SimpleFilter, SoapFault};

/// Namespace of the partner API request/response vocabulary.
pub const PARTNER_NS: &str = "http://exacttarget.com/wsdl/partnerAPI";

/// Namespace of the `fueloauth` authentication header element.
pub const FUEL_NS: &str = "http://exacttarget.com";
