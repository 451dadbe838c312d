//! JSON-LD writer for RDF graphs
//!
//! Turns an RDF statement graph into a single compacted JSON-LD document.
//! IRIs are abbreviated to CURIEs against a prefix table, only the prefixes
//! that were used end up in `@context`, and the output is deterministic:
//! the same graph and options always give byte-identical text.
//!
//! # Modules
//!
//! - [`rdf`]: terms, triples, the in-memory store, prefix tables,
//!   Turtle / N-Triples parsing and the JSON-LD writer itself
//!
//! ## Example Usage
//!
//! ```rust
//! use jsonld_writer::{JsonLdWriter, RdfFormat, RdfParser, RdfStore, WriterOptions};
//!
//! let turtle = r#"
//!     @prefix foaf: <http://xmlns.com/foaf/0.1/> .
//!     <http://example.org/alice> a foaf:Person ; foaf:name "Alice" .
//!     <http://example.org/bob> a foaf:Person ; foaf:knows <http://example.org/alice> .
//! "#;
//! let store: RdfStore = RdfParser::parse(turtle, RdfFormat::Turtle, None)
//!     .unwrap()
//!     .into_iter()
//!     .collect();
//!
//! let options = WriterOptions::new().with_prefix("foaf", "http://xmlns.com/foaf/0.1/");
//! let writer = JsonLdWriter::new(options).unwrap();
//! let document = writer.serialize(&store);
//!
//! assert_eq!(document["@context"]["foaf"], "http://xmlns.com/foaf/0.1/");
//! assert_eq!(document["@graph"][0]["@type"], "foaf:Person");
//! assert_eq!(document["@graph"][1]["foaf:knows"]["@id"], "http://example.org/alice");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod rdf;

// Re-export main types for convenience
pub use rdf::{
    BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfStore, RdfStoreError,
    RdfStoreResult, RdfSubject, Triple, TriplePattern, TripleSource,
    PrefixError, PrefixTable, STANDARD_PREFIXES,
    RdfFormat, RdfParser, RdfSerializer, ParseError, SerializeError,
    JsonLdError, JsonLdResult, JsonLdWriter, PropertyIndex, WriterOptions,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
