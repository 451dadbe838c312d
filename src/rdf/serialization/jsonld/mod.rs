//! JSON-LD serialization
//!
//! Compacts a statement graph into a single JSON-LD document:
//!
//! - subjects become node objects (`@id`, `@type`, one key per predicate),
//! - IRIs are abbreviated to CURIEs against a prefix table, and only the
//!   prefixes actually used end up in `@context`,
//! - one subject yields a bare node object, several yield `@graph`.
//!
//! Output is a pure function of the graph's enumeration order and the
//! options: serializing the same graph twice gives byte-identical text.

mod bnode;
mod node;
mod options;
mod order;
mod prefix;
mod properties;

pub use bnode::BlankNodeRenamer;
pub use node::{NodeObject, NodeSerializer, NodeSettings};
pub use options::WriterOptions;
pub use order::{keyword_cmp, keyword_order, term_cmp, term_order, KEYWORD_ORDER};
pub use prefix::{check_local_part, AbbreviationError, PrefixResolver, UsedPrefixes};
pub use properties::{Properties, PropertyIndex};

use crate::rdf::{PrefixError, RdfObject, RdfSubject, TripleSource};
use indexmap::IndexSet;
use serde_json::{Map, Value};
use std::io;
use thiserror::Error;
use tracing::debug;

/// JSON-LD writer errors
#[derive(Error, Debug)]
pub enum JsonLdError {
    /// Malformed prefix table; reported before any serialization work
    #[error("Invalid options: {0}")]
    InvalidOptions(PrefixError),

    /// Unreadable options file
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type JsonLdResult<T> = Result<T, JsonLdError>;

/// Graph → JSON-LD document writer
///
/// Immutable once built; every call runs its own session (property
/// index, used prefixes, blank node labels), so one writer can serve
/// several graphs or threads.
#[derive(Debug, Clone)]
pub struct JsonLdWriter {
    options: WriterOptions,
    resolver: PrefixResolver,
}

impl JsonLdWriter {
    /// Validate `options` and build the prefix lookup
    pub fn new(options: WriterOptions) -> JsonLdResult<Self> {
        let table = options.prefix_table()?;
        debug!("JSON-LD writer with {} prefixes", table.len());
        Ok(Self {
            options,
            resolver: PrefixResolver::new(table),
        })
    }

    /// Options this writer was built with
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Prefix resolver this writer abbreviates with
    pub fn resolver(&self) -> &PrefixResolver {
        &self.resolver
    }

    /// Serialize `graph` into a JSON-LD document
    pub fn serialize<G>(&self, graph: &G) -> Value
    where
        G: TripleSource + ?Sized,
    {
        let mut index = PropertyIndex::new();
        self.serialize_cached(graph, &mut index)
    }

    /// Like [`serialize`](Self::serialize), reusing the caller's property index.
    ///
    /// Cached entries are used as they are, for every key of a node
    /// including `@type`; invalidate them (or pass a fresh index) after the
    /// graph changed.
    pub fn serialize_cached<G>(&self, graph: &G, index: &mut PropertyIndex) -> Value
    where
        G: TripleSource + ?Sized,
    {
        let settings = NodeSettings {
            rename_bnodes: self.options.rename_bnodes,
            use_native_types: self.options.use_native_types,
        };
        let subjects = graph.subjects();
        let shadowing = self.shadowing_iris(graph, &subjects, index);
        let resolver = self.resolver.for_document(shadowing.iter().map(String::as_str));

        let mut serializer = NodeSerializer::new(graph, index, &resolver, settings);
        let mut nodes: Vec<NodeObject> = subjects.iter().map(|s| serializer.serialize(s)).collect();
        let used = serializer.into_used_prefixes();

        let context = resolver.context(&used);
        let compact_arrays = self.options.compact_arrays && !context.is_empty();
        debug!(
            "Serialized {} subjects using {} prefixes",
            nodes.len(),
            used.len()
        );

        let mut document = Map::new();
        if !context.is_empty() {
            document.insert("@context".to_string(), Value::Object(context));
        }
        match (nodes.len(), nodes.pop()) {
            (1, Some(node)) => document.extend(node.into_json(compact_arrays)),
            (_, last) => {
                nodes.extend(last);
                let graph = nodes
                    .into_iter()
                    .map(|node| Value::Object(node.into_json(compact_arrays)))
                    .collect();
                document.insert("@graph".to_string(), Value::Array(graph));
            }
        }
        Value::Object(document)
    }

    /// IRIs of the graph that would read as a CURIE if written out in full.
    ///
    /// Walks the same index entries the nodes are rendered from.
    fn shadowing_iris<G>(
        &self,
        graph: &G,
        subjects: &[RdfSubject],
        index: &mut PropertyIndex,
    ) -> IndexSet<String>
    where
        G: TripleSource + ?Sized,
    {
        let mut found = IndexSet::new();
        let mut note = |iri: &str| {
            if self.resolver.shadowed_prefix(iri).is_some() {
                found.insert(iri.to_string());
            }
        };

        for subject in subjects {
            if let RdfSubject::NamedNode(n) = subject {
                note(n.as_str());
            }
            for (predicate, objects) in index.properties_of(graph, subject, false) {
                note(predicate);
                for object in objects {
                    match object {
                        RdfObject::NamedNode(n) => note(n.as_str()),
                        RdfObject::Literal(l) if l.language().is_none() && !l.is_plain() => {
                            note(l.datatype_iri())
                        }
                        _ => {}
                    }
                }
            }
        }
        found
    }

    /// Serialize `graph` to compact JSON text
    pub fn to_string<G>(&self, graph: &G) -> JsonLdResult<String>
    where
        G: TripleSource + ?Sized,
    {
        Ok(serde_json::to_string(&self.serialize(graph))?)
    }

    /// Serialize `graph` to indented JSON text
    pub fn to_string_pretty<G>(&self, graph: &G) -> JsonLdResult<String>
    where
        G: TripleSource + ?Sized,
    {
        Ok(serde_json::to_string_pretty(&self.serialize(graph))?)
    }

    /// Serialize `graph` into `writer`
    pub fn write_to<G, W>(&self, graph: &G, writer: W, pretty: bool) -> JsonLdResult<()>
    where
        G: TripleSource + ?Sized,
        W: io::Write,
    {
        let document = self.serialize(graph);
        if pretty {
            serde_json::to_writer_pretty(writer, &document)?;
        } else {
            serde_json::to_writer(writer, &document)?;
        }
        Ok(())
    }
}
