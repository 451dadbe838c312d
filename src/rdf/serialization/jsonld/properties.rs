//! Per-subject property index
//!
//! Maps predicate IRI → objects for one subject, in the order the graph
//! yields its statements. Entries are built on first use and cached until
//! invalidated; the index never watches the graph for changes.

use crate::rdf::{RdfObject, RdfPredicate, RdfSubject, TripleSource};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::trace;

/// Predicate IRI → objects, in first-seen predicate order
pub type Properties = IndexMap<String, Vec<RdfObject>>;

/// Cache of [`Properties`] keyed by subject, owned by one serialization session
#[derive(Debug, Clone, Default)]
pub struct PropertyIndex {
    cache: HashMap<RdfSubject, Properties>,
}

impl PropertyIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Properties of `subject`, built from `graph` on first request.
    ///
    /// With `force_recompute` the cached entry is dropped and rebuilt from
    /// the current graph contents.
    pub fn properties_of<G>(
        &mut self,
        graph: &G,
        subject: &RdfSubject,
        force_recompute: bool,
    ) -> &Properties
    where
        G: TripleSource + ?Sized,
    {
        if force_recompute {
            self.cache.remove(subject);
        }
        self.cache
            .entry(subject.clone())
            .or_insert_with(|| build_properties(graph, subject))
    }

    /// All `rdf:type` objects of `subject`, in statement order, duplicates kept
    pub fn types_of<G>(graph: &G, subject: &RdfSubject) -> Vec<RdfObject>
    where
        G: TripleSource + ?Sized,
    {
        let rdf_type = RdfPredicate::rdf_type();
        graph
            .triples_with_subject(subject)
            .filter(|triple| triple.predicate == rdf_type)
            .map(|triple| triple.object.clone())
            .collect()
    }

    /// Drop the cached entry for `subject`; returns true if there was one
    pub fn invalidate(&mut self, subject: &RdfSubject) -> bool {
        self.cache.remove(subject).is_some()
    }

    /// Drop every cached entry
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Check if `subject` has a cached entry
    pub fn is_cached(&self, subject: &RdfSubject) -> bool {
        self.cache.contains_key(subject)
    }

    /// Number of cached subjects
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn build_properties<G>(graph: &G, subject: &RdfSubject) -> Properties
where
    G: TripleSource + ?Sized,
{
    let mut properties = Properties::new();
    for triple in graph.triples_with_subject(subject) {
        properties
            .entry(triple.predicate.as_str().to_string())
            .or_default()
            .push(triple.object.clone());
    }
    trace!("Indexed {} predicates for {}", properties.len(), subject);
    properties
}
