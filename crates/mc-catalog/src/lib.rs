//! # sfmc-catalog
//!
//! The externally supplied object catalog: for each logical object name,
//! which protocol serves it, how to address it on the wire, and which
//! fields to request.
//!
//! The catalog is read-only input. HTTP verbs are validated while the
//! document is deserialized, so an unknown verb fails at configuration load
//! rather than at call time. Lookups are by exact name; the first match
//! wins and duplicates are not rejected.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

mod error;

pub use error::{Error, ErrorKind, Result};

/// Which API surface serves an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Soap,
    Rest,
}

/// HTTP verb of a REST catalog entry, resolved at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestVerb {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl FromStr for RestVerb {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(RestVerb::Get),
            "post" => Ok(RestVerb::Post),
            "patch" => Ok(RestVerb::Patch),
            "put" => Ok(RestVerb::Put),
            "delete" => Ok(RestVerb::Delete),
            other => Err(format!("unknown HTTP verb '{}'", other)),
        }
    }
}

impl<'de> Deserialize<'de> for RestVerb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// A SOAP object definition.
#[derive(Debug, Clone, Deserialize)]
pub struct SoapDefinition {
    /// Logical name, equal to the wire object type.
    pub name: String,
    /// Field list used by export-style fetches.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Property list used by copy-style retrieves.
    #[serde(default)]
    pub properties: Vec<String>,
    /// Folder identifier property, when the object type supports a
    /// wire-level folder filter.
    #[serde(default)]
    pub folder_property: Option<String>,
}

impl SoapDefinition {
    /// Properties to request when retrieving for migration; falls back to
    /// the field list when no dedicated property list is declared.
    pub fn retrieve_properties(&self) -> &[String] {
        if self.properties.is_empty() {
            &self.fields
        } else {
            &self.properties
        }
    }
}

/// A REST object definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RestDefinition {
    /// Logical name.
    pub name: String,
    /// Resource path; may contain an `{id}` placeholder.
    pub endpoint: String,
    /// Fields to request (`$fields`).
    #[serde(default)]
    pub fields: Vec<String>,
    /// HTTP verb used for fetches.
    pub method: RestVerb,
    /// Fixed filter expression (`$filter`), if any.
    #[serde(default)]
    pub filter: Option<String>,
    /// Sort expression (`$orderBy`), if any.
    #[serde(default)]
    pub order_by: Option<String>,
}

impl RestDefinition {
    /// The endpoint with the `{id}` placeholder substituted.
    pub fn endpoint_for(&self, id: &str) -> String {
        self.endpoint.replace("{id}", id)
    }
}

/// A catalog entry resolved by name.
#[derive(Debug)]
pub enum CatalogEntry<'a> {
    Soap(&'a SoapDefinition),
    Rest(&'a RestDefinition),
}

impl CatalogEntry<'_> {
    /// Which protocol serves this entry.
    pub fn protocol(&self) -> Protocol {
        match self {
            CatalogEntry::Soap(_) => Protocol::Soap,
            CatalogEntry::Rest(_) => Protocol::Rest,
        }
    }
}

/// The full catalog: SOAP definitions, REST definitions, and the
/// folder-type lookup table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub soap: Vec<SoapDefinition>,
    #[serde(default)]
    pub rest: Vec<RestDefinition>,
    /// Maps an object name to the content type of the folders holding it.
    #[serde(default)]
    pub folder_types: HashMap<String, String>,
}

impl Catalog {
    /// Parse a catalog from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Find a SOAP definition by exact name. First match wins.
    pub fn find_soap(&self, name: &str) -> Option<&SoapDefinition> {
        self.soap.iter().find(|d| d.name == name)
    }

    /// Find a REST definition by exact name. First match wins.
    pub fn find_rest(&self, name: &str) -> Option<&RestDefinition> {
        self.rest.iter().find(|d| d.name == name)
    }

    /// Resolve a name against both catalogs, SOAP first.
    pub fn find(&self, name: &str) -> Result<CatalogEntry<'_>> {
        if let Some(definition) = self.find_soap(name) {
            return Ok(CatalogEntry::Soap(definition));
        }
        if let Some(definition) = self.find_rest(name) {
            return Ok(CatalogEntry::Rest(definition));
        }
        Err(Error::new(ErrorKind::UnknownObject(name.to_string())))
    }

    /// Folder content type for an object name, if the table declares one.
    pub fn folder_type(&self, name: &str) -> Option<&str> {
        self.folder_types.get(name).map(String::as_str)
    }
}
