//! RDF namespace and prefix management
//!
//! A [`PrefixTable`] maps prefix names to namespace IRIs. Every entry is
//! validated on insertion, so a table that exists is always safe to turn
//! into a JSON-LD `@context`.

use indexmap::IndexMap;
use oxiri::Iri;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Prefix name that cannot appear in a compact IRI
    #[error("Invalid prefix name: {0:?}")]
    InvalidPrefixName(String),

    /// Namespace that is not an absolute IRI
    #[error("Invalid namespace IRI for prefix {prefix:?}: {iri} ({reason})")]
    InvalidNamespace {
        prefix: String,
        iri: String,
        reason: String,
    },

    /// String that is not of the form `prefix:local`
    #[error("Not a compact IRI: {0}")]
    InvalidCurie(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Well-known vocabulary prefixes, merged in when standard prefixes are enabled
pub const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("cc", "http://creativecommons.org/ns#"),
    ("dc", "http://purl.org/dc/terms/"),
    ("dc11", "http://purl.org/dc/elements/1.1/"),
    ("doap", "http://usefulinc.com/ns/doap#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("geo", "http://www.w3.org/2003/01/geo/wgs84_pos#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("prov", "http://www.w3.org/ns/prov#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("schema", "http://schema.org/"),
    ("sioc", "http://rdfs.org/sioc/ns#"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("vcard", "http://www.w3.org/2006/vcard/ns#"),
    ("void", "http://rdfs.org/ns/void#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// Validated prefix name → namespace IRI mapping
///
/// The empty name `""` is allowed and stands for the default vocabulary
/// (`:local` CURIEs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTable {
    entries: IndexMap<String, String>,
}

impl PrefixTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding [`STANDARD_PREFIXES`]
    pub fn standard() -> Self {
        let entries = STANDARD_PREFIXES
            .iter()
            .map(|(prefix, iri)| (prefix.to_string(), iri.to_string()))
            .collect();
        Self { entries }
    }

    /// Add a prefix, replacing any previous namespace for the same name
    pub fn insert(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> PrefixResult<()> {
        let prefix = prefix.into();
        let iri = iri.into();
        validate_prefix_name(&prefix)?;
        if let Err(e) = Iri::parse(iri.as_str()) {
            return Err(PrefixError::InvalidNamespace {
                prefix,
                iri,
                reason: e.to_string(),
            });
        }
        self.entries.insert(prefix, iri);
        Ok(())
    }

    /// Add every entry of `other`; entries already present win
    pub fn merge_missing(&mut self, other: &PrefixTable) {
        for (prefix, iri) in &other.entries {
            if !self.entries.contains_key(prefix) {
                self.entries.insert(prefix.clone(), iri.clone());
            }
        }
    }

    /// Drop a prefix; returns its namespace if it was present
    pub fn remove(&mut self, prefix: &str) -> Option<String> {
        self.entries.shift_remove(prefix)
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.entries
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (`prefix:local` or `:local`) to a full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        let (prefix, local) = compact_iri
            .split_once(':')
            .ok_or_else(|| PrefixError::InvalidCurie(compact_iri.to_string()))?;
        if local.starts_with("//") {
            return Err(PrefixError::InvalidCurie(compact_iri.to_string()));
        }
        let iri = self.get_iri(prefix)?;
        Ok(format!("{}{}", iri, local))
    }

    /// Check if the table has an entry for `prefix`
    pub fn contains(&self, prefix: &str) -> bool {
        self.entries.contains_key(prefix)
    }

    /// Iterate over (prefix, namespace) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, i)| (p.as_str(), i.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Prefix names follow Turtle's PN_PREFIX, approximated: a letter, then
/// letters, digits, `_`, `-` or `.`, not ending with `.`.
///
/// `_` alone is excluded because `_:` marks blank nodes.
fn validate_prefix_name(prefix: &str) -> PrefixResult<()> {
    if prefix.is_empty() {
        return Ok(());
    }
    let mut chars = prefix.chars();
    let first_ok = chars.next().map_or(false, char::is_alphabetic);
    let rest_ok = chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if first_ok && rest_ok && !prefix.ends_with('.') {
        Ok(())
    } else {
        Err(PrefixError::InvalidPrefixName(prefix.to_string()))
    }
}
