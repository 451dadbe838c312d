//! JSON-LD writer configuration

use super::{JsonLdError, JsonLdResult};
use crate::rdf::PrefixTable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for [`JsonLdWriter`](super::JsonLdWriter)
///
/// Can be built in code or loaded from YAML:
///
/// ```yaml
/// prefixes:
///   foaf: http://xmlns.com/foaf/0.1/
///   "": http://example.org/vocab#
/// standard_prefixes: true
/// rename_bnodes: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterOptions {
    /// Prefix name → namespace IRI
    pub prefixes: IndexMap<String, String>,
    /// Also use the well-known vocabulary prefixes; explicit prefixes win
    pub standard_prefixes: bool,
    /// Relabel blank nodes `_:b0`, `_:b1`, ... in first-encounter order
    pub rename_bnodes: bool,
    /// Unwrap single-valued properties when the document has a context
    pub compact_arrays: bool,
    /// Emit canonical `xsd:boolean` and `xsd:integer` values as JSON values
    pub use_native_types: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            prefixes: IndexMap::new(),
            standard_prefixes: false,
            rename_bnodes: true,
            compact_arrays: true,
            use_native_types: false,
        }
    }
}

impl WriterOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), iri.into());
        self
    }

    pub fn with_standard_prefixes(mut self, enabled: bool) -> Self {
        self.standard_prefixes = enabled;
        self
    }

    pub fn with_rename_bnodes(mut self, enabled: bool) -> Self {
        self.rename_bnodes = enabled;
        self
    }

    pub fn with_compact_arrays(mut self, enabled: bool) -> Self {
        self.compact_arrays = enabled;
        self
    }

    pub fn with_native_types(mut self, enabled: bool) -> Self {
        self.use_native_types = enabled;
        self
    }

    /// Parse options from a YAML document
    pub fn from_yaml_str(yaml: &str) -> JsonLdResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read options from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> JsonLdResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// The validated prefix table these options describe
    pub fn prefix_table(&self) -> JsonLdResult<PrefixTable> {
        let mut table = PrefixTable::new();
        for (prefix, iri) in &self.prefixes {
            table
                .insert(prefix.as_str(), iri.as_str())
                .map_err(JsonLdError::InvalidOptions)?;
        }
        if self.standard_prefixes {
            table.merge_missing(&PrefixTable::standard());
        }
        Ok(table)
    }
}
