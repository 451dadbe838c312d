//! RDF support
//!
//! This module implements the statement graph the JSON-LD writer reads from:
//! - RDF triples (subject-predicate-object) over oxrdf terms
//! - An insertion-ordered in-memory store
//! - Prefix tables (standard vocabularies and user prefixes)
//! - Serialization formats (Turtle, N-Triples, JSON-LD)
//!
//! # Example
//!
//! ```rust
//! use jsonld_writer::rdf::{JsonLdWriter, Literal, NamedNode, RdfPredicate, RdfStore, Triple, WriterOptions};
//!
//! let mut store = RdfStore::new();
//!
//! let subject = NamedNode::new("http://example.org/alice").unwrap();
//! let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let object = Literal::new_simple_literal("Alice");
//! store.insert(Triple::new(subject.into(), predicate, object.into()));
//!
//! let writer = JsonLdWriter::new(WriterOptions::new().with_standard_prefixes(true)).unwrap();
//! let json = writer.to_string(&store).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"@context":{"foaf":"http://xmlns.com/foaf/0.1/"},"@id":"http://example.org/alice","foaf:name":"Alice"}"#
//! );
//! ```

mod namespace;
mod serialization;
mod store;
mod types;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple, TriplePattern,
};

pub use store::{RdfStore, RdfStoreError, RdfStoreResult, TripleSource};

pub use namespace::{PrefixError, PrefixResult, PrefixTable, STANDARD_PREFIXES};

pub use serialization::{
    ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer, SerializeError,
    SerializeResult, TurtleParserWrapper, TurtleSerializerWrapper,
};

pub use serialization::jsonld::{
    self, JsonLdError, JsonLdResult, JsonLdWriter, NodeObject, NodeSerializer, NodeSettings,
    PrefixResolver, PropertyIndex, WriterOptions,
};
