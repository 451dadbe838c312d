//! In-memory RDF triple store
//!
//! Statements are grouped by subject and kept in insertion order, so the
//! natural enumeration of the store (subjects, then statements per subject)
//! is stable across runs. The JSON-LD writer relies on that to produce
//! byte-identical output for identical input.

use super::types::{RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// RDF store errors
#[derive(Error, Debug)]
pub enum RdfStoreError {
    /// Triple not found
    #[error("Triple not found: {0}")]
    TripleNotFound(String),
}

pub type RdfStoreResult<T> = Result<T, RdfStoreError>;

/// Read access to a set of statements, as needed by the serializers.
///
/// Implementations define the enumeration order; the writer never sorts
/// subjects or statements on its own.
pub trait TripleSource {
    /// Distinct subjects, in the source's natural order
    fn subjects(&self) -> Vec<RdfSubject>;

    /// Statements whose subject is `subject`, in the source's natural order
    fn triples_with_subject<'a>(
        &'a self,
        subject: &RdfSubject,
    ) -> Box<dyn Iterator<Item = &'a Triple> + 'a>;

    /// Check if `subject` has at least one statement
    fn has_subject(&self, subject: &RdfSubject) -> bool {
        self.triples_with_subject(subject).next().is_some()
    }
}

/// RDF triple store indexed by subject
#[derive(Debug, Clone, Default)]
pub struct RdfStore {
    /// Subject -> statements about it, both in insertion order
    by_subject: IndexMap<RdfSubject, IndexSet<Triple>>,

    /// Total number of statements
    len: usize,
}

impl RdfStore {
    /// Create a new empty RDF store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple; returns false if it was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        let added = self
            .by_subject
            .entry(triple.subject.clone())
            .or_default()
            .insert(triple);
        if added {
            self.len += 1;
        }
        added
    }

    /// Remove a triple from the store
    pub fn remove(&mut self, triple: &Triple) -> RdfStoreResult<()> {
        let statements = self
            .by_subject
            .get_mut(&triple.subject)
            .ok_or_else(|| RdfStoreError::TripleNotFound(triple.to_string()))?;

        if !statements.shift_remove(triple) {
            return Err(RdfStoreError::TripleNotFound(triple.to_string()));
        }
        if statements.is_empty() {
            self.by_subject.shift_remove(&triple.subject);
        }
        self.len -= 1;
        Ok(())
    }

    /// Check if a triple exists in the store
    pub fn contains(&self, triple: &Triple) -> bool {
        self.by_subject
            .get(&triple.subject)
            .map_or(false, |statements| statements.contains(triple))
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clear all triples
    pub fn clear(&mut self) {
        self.by_subject.clear();
        self.len = 0;
    }

    /// Query triples matching a pattern
    pub fn query(&self, pattern: &TriplePattern) -> Vec<Triple> {
        match &pattern.subject {
            Some(subject) => self
                .by_subject
                .get(subject)
                .into_iter()
                .flatten()
                .filter(|triple| pattern.matches(triple))
                .cloned()
                .collect(),
            None => self
                .iter()
                .filter(|triple| pattern.matches(triple))
                .cloned()
                .collect(),
        }
    }

    /// Get the objects of `predicate` for `subject`
    pub fn objects_for(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Vec<RdfObject> {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter(|triple| &triple.predicate == predicate)
            .map(|triple| triple.object.clone())
            .collect()
    }

    /// Get an iterator over all triples, grouped by subject
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.by_subject.values().flatten()
    }
}

impl TripleSource for RdfStore {
    fn subjects(&self) -> Vec<RdfSubject> {
        self.by_subject.keys().cloned().collect()
    }

    fn triples_with_subject<'a>(
        &'a self,
        subject: &RdfSubject,
    ) -> Box<dyn Iterator<Item = &'a Triple> + 'a> {
        match self.by_subject.get(subject) {
            Some(statements) => Box::new(statements.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_subject(&self, subject: &RdfSubject) -> bool {
        self.by_subject.contains_key(subject)
    }
}

/// A plain slice of triples, e.g. the output of a parser.
///
/// Subjects are enumerated in order of first appearance. Every lookup scans
/// the whole slice; collect into an [`RdfStore`] before writing large graphs.
impl TripleSource for [Triple] {
    fn subjects(&self) -> Vec<RdfSubject> {
        let subjects: IndexSet<&RdfSubject> = self.iter().map(|t| &t.subject).collect();
        subjects.into_iter().cloned().collect()
    }

    fn triples_with_subject<'a>(
        &'a self,
        subject: &RdfSubject,
    ) -> Box<dyn Iterator<Item = &'a Triple> + 'a> {
        let subject = subject.clone();
        let mut seen = IndexSet::new();
        Box::new(
            self.iter()
                .filter(move |t| t.subject == subject)
                .filter(move |t| seen.insert(*t)),
        )
    }
}

impl FromIterator<Triple> for RdfStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<Triple> for RdfStore {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}
