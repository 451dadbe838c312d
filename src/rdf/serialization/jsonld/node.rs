//! Rendering one subject as a JSON-LD node object

use super::bnode::BlankNodeRenamer;
use super::order::keyword_cmp;
use super::prefix::{PrefixResolver, UsedPrefixes};
use super::properties::PropertyIndex;
use crate::rdf::{BlankNode, Literal, RdfObject, RdfSubject, TripleSource};
use indexmap::IndexMap;
use oxrdf::vocab::{rdf, xsd};
use serde_json::{json, Map, Value};
use tracing::debug;

/// One subject's JSON-LD form, before array compaction.
///
/// Property values are always held as lists; whether a single value is
/// unwrapped is decided once the whole document (and its context) is known.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeObject {
    /// `@id`: compacted IRI or `_:label`
    pub id: String,
    /// `@type` values, compacted, in statement order
    pub types: Vec<String>,
    /// Property key → values, in property-index order
    pub properties: IndexMap<String, Vec<Value>>,
}

impl NodeObject {
    /// Node with only an `@id`
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            types: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    /// Render as a JSON object: `@id`, `@type`, then keys in keyword order.
    ///
    /// With `compact_arrays`, single-valued properties lose their array.
    pub fn into_json(self, compact_arrays: bool) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("@id".to_string(), Value::String(self.id));

        let mut types = self.types;
        match types.len() {
            0 => {}
            1 => {
                map.insert("@type".to_string(), Value::String(types.remove(0)));
            }
            _ => {
                let types = types.into_iter().map(Value::String).collect();
                map.insert("@type".to_string(), Value::Array(types));
            }
        }

        let mut properties: Vec<(String, Vec<Value>)> = self.properties.into_iter().collect();
        properties.sort_by(|a, b| keyword_cmp(&a.0, &b.0));
        for (key, mut values) in properties {
            let value = if compact_arrays && values.len() == 1 {
                values.remove(0)
            } else {
                Value::Array(values)
            };
            map.insert(key, value);
        }
        map
    }
}

/// Per-session settings of the node serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeSettings {
    /// Relabel blank nodes `_:b0`, `_:b1`, ...
    pub rename_bnodes: bool,
    /// Emit canonical `xsd:boolean` / `xsd:integer` literals as JSON values
    pub use_native_types: bool,
}

/// Term-level compaction state shared by every node of one document
#[derive(Debug)]
struct TermCompactor<'a> {
    resolver: &'a PrefixResolver,
    used: UsedPrefixes,
    renamer: Option<BlankNodeRenamer>,
    use_native_types: bool,
}

impl TermCompactor<'_> {
    fn iri(&mut self, iri: &str) -> String {
        self.resolver.compact_iri(iri, &mut self.used)
    }

    fn blank(&mut self, node: &BlankNode) -> String {
        match self.renamer.as_mut() {
            Some(renamer) => renamer.rename(node).to_string(),
            None => node.to_string(),
        }
    }

    fn subject(&mut self, subject: &RdfSubject) -> String {
        match subject {
            RdfSubject::NamedNode(n) => self.iri(n.as_str()),
            RdfSubject::BlankNode(b) => self.blank(b),
        }
    }

    fn object(&mut self, object: &RdfObject) -> Value {
        match object {
            RdfObject::NamedNode(n) => json!({ "@id": self.iri(n.as_str()) }),
            RdfObject::BlankNode(b) => json!({ "@id": self.blank(b) }),
            RdfObject::Literal(l) => self.literal(l),
        }
    }

    fn literal(&mut self, literal: &Literal) -> Value {
        if let Some(language) = literal.language() {
            return json!({ "@value": literal.value(), "@language": language });
        }
        if literal.is_plain() {
            return Value::String(literal.value().to_string());
        }
        if self.use_native_types {
            if let Some(native) = native_value(literal) {
                return native;
            }
        }
        let datatype = literal.datatype();
        json!({ "@value": literal.value(), "@type": self.iri(datatype.as_str()) })
    }
}

/// JSON value for canonical booleans and integers that fit an `i64`
fn native_value(literal: &Literal) -> Option<Value> {
    let datatype = literal.datatype();
    let lexical = literal.value();
    if datatype.as_str() == xsd::BOOLEAN.as_str() {
        match lexical {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        }
    } else if datatype.as_str() == xsd::INTEGER.as_str() {
        let n: i64 = lexical.parse().ok()?;
        (n.to_string() == lexical).then(|| Value::from(n))
    } else {
        None
    }
}

/// Serializes subjects of one graph into [`NodeObject`]s.
///
/// Owns the used-prefix set and the blank-node renamer for the document,
/// so every node of a document must go through the same serializer.
pub struct NodeSerializer<'a, G: ?Sized> {
    graph: &'a G,
    index: &'a mut PropertyIndex,
    terms: TermCompactor<'a>,
}

impl<'a, G> NodeSerializer<'a, G>
where
    G: TripleSource + ?Sized,
{
    pub fn new(
        graph: &'a G,
        index: &'a mut PropertyIndex,
        resolver: &'a PrefixResolver,
        settings: NodeSettings,
    ) -> Self {
        Self {
            graph,
            index,
            terms: TermCompactor {
                resolver,
                used: UsedPrefixes::new(),
                renamer: settings.rename_bnodes.then(BlankNodeRenamer::default),
                use_native_types: settings.use_native_types,
            },
        }
    }

    /// Render `subject` with all of its properties.
    ///
    /// Everything, `@type` included, comes from the subject's entry in the
    /// property index, so a node never mixes a cached and a live view.
    pub fn serialize(&mut self, subject: &RdfSubject) -> NodeObject {
        let mut node = NodeObject::new(self.terms.subject(subject));
        let properties = self.index.properties_of(self.graph, subject, false);

        for ty in properties.get(rdf::TYPE.as_str()).into_iter().flatten() {
            match ty {
                RdfObject::NamedNode(n) => node.types.push(self.terms.iri(n.as_str())),
                RdfObject::BlankNode(b) => node.types.push(self.terms.blank(b)),
                // literals cannot be @type values and stay under rdf:type below
                RdfObject::Literal(_) => {}
            }
        }

        for (predicate, objects) in properties {
            let is_type = predicate == rdf::TYPE.as_str();
            let mut values = Vec::with_capacity(objects.len());
            for object in objects {
                if is_type && !object.is_literal() {
                    continue;
                }
                if let RdfObject::BlankNode(b) = object {
                    if !self.graph.has_subject(&RdfSubject::BlankNode(b.clone())) {
                        debug!("Blank node {} is referenced but never described", b);
                    }
                }
                values.push(self.terms.object(object));
            }
            if values.is_empty() {
                continue;
            }
            let key = self.terms.iri(predicate);
            node.properties.entry(key).or_default().extend(values);
        }

        node
    }

    /// Finish the session, keeping the used-prefix set
    pub fn into_used_prefixes(self) -> UsedPrefixes {
        self.terms.used
    }
}
