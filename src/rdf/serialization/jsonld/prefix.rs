//! CURIE abbreviation against a prefix table
//!
//! Namespaces are matched longest-first so the most specific prefix wins.
//! A namespace only applies when the remaining local part is a legal CURIE
//! suffix; otherwise the next (shorter) namespace is tried, and finally the
//! full IRI is used. Every prefix that produced a CURIE is recorded so the
//! document context can be limited to what was used.
//!
//! A full IRI such as `ex:thing` reads as a CURIE once `ex` is in the
//! context, so [`PrefixResolver::for_document`] drops such prefixes before a
//! document is written.

use super::order::{keyword_order, term_order};
use crate::rdf::PrefixTable;
use indexmap::{IndexMap, IndexSet};
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{trace, warn};

/// Prefix names that produced at least one CURIE during a serialization pass
pub type UsedPrefixes = BTreeSet<String>;

/// Why a namespace match was not turned into a CURIE.
///
/// Never surfaced to callers: the resolver falls back to the full IRI.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbbreviationError {
    #[error("IRI equals the namespace, local part is empty")]
    EmptyLocalPart,

    #[error("local part starts with ':' and would read as another compact IRI")]
    AmbiguousLocalPart,

    #[error("illegal character {0:?} in local part")]
    IllegalCharacter(char),

    #[error("malformed percent escape in local part")]
    BadPercentEscape,
}

/// Check that `local` can follow `prefix:` and expand back to the same IRI.
///
/// Approximates Turtle's PN_LOCAL without backslash escapes: letters,
/// digits, `_`, `-`, `.`, `:`, `·` and `%HH` escapes; the first character is
/// a letter, digit, `_` or escape; the last is not `.`.
pub fn check_local_part(local: &str) -> Result<(), AbbreviationError> {
    if local.is_empty() {
        return Err(AbbreviationError::EmptyLocalPart);
    }
    if local.starts_with(':') {
        return Err(AbbreviationError::AmbiguousLocalPart);
    }

    let mut chars = local.chars();
    let mut first = true;
    while let Some(c) = chars.next() {
        if c == '%' {
            match (chars.next(), chars.next()) {
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {}
                _ => return Err(AbbreviationError::BadPercentEscape),
            }
        } else if first {
            if !(c.is_alphanumeric() || c == '_') {
                return Err(AbbreviationError::IllegalCharacter(c));
            }
        } else if !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '\u{00B7}')) {
            return Err(AbbreviationError::IllegalCharacter(c));
        }
        first = false;
    }

    if local.ends_with('.') {
        return Err(AbbreviationError::IllegalCharacter('.'));
    }
    if percent_decode_str(local).decode_utf8().is_err() {
        return Err(AbbreviationError::BadPercentEscape);
    }
    Ok(())
}

/// Turns IRIs into CURIEs using a fixed prefix table
#[derive(Debug, Clone)]
pub struct PrefixResolver {
    table: PrefixTable,
    /// Namespace IRI → prefix names in term order, longest namespace first
    namespaces: Vec<(String, Vec<String>)>,
}

impl PrefixResolver {
    /// Build the lookup once; the table is read-only afterwards
    pub fn new(table: PrefixTable) -> Self {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for (prefix, iri) in table.iter() {
            grouped
                .entry(iri.to_string())
                .or_default()
                .push(prefix.to_string());
        }

        // Within one namespace every candidate shares the same local part,
        // so ordering the names orders the candidate CURIEs.
        let mut namespaces: Vec<(String, Vec<String>)> = grouped
            .into_iter()
            .map(|(iri, names)| (iri, term_order(names)))
            .collect();
        namespaces.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Self { table, namespaces }
    }

    /// The table this resolver abbreviates against
    pub fn table(&self) -> &PrefixTable {
        &self.table
    }

    /// Abbreviate `iri`, or `None` when no namespace yields a legal CURIE
    pub fn resolve(&self, iri: &str, used: &mut UsedPrefixes) -> Option<String> {
        for (namespace, names) in &self.namespaces {
            let Some(local) = iri.strip_prefix(namespace.as_str()) else {
                continue;
            };
            let Some(name) = names.first() else {
                continue;
            };
            if let Err(reason) = check_local_part(local) {
                trace!("Not abbreviating {} with prefix {:?}: {}", iri, name, reason);
                continue;
            }
            used.insert(name.clone());
            return Some(format!("{}:{}", name, local));
        }
        None
    }

    /// Abbreviate `iri`, falling back to the full IRI
    pub fn compact_iri(&self, iri: &str, used: &mut UsedPrefixes) -> String {
        self.resolve(iri, used).unwrap_or_else(|| iri.to_string())
    }

    /// Prefix name that `iri`, written out in full, would be read as.
    ///
    /// `name:rest` is a compact IRI for a known `name` unless `rest` starts
    /// with `//`.
    pub fn shadowed_prefix<'i>(&self, iri: &'i str) -> Option<&'i str> {
        let (scheme, rest) = iri.split_once(':')?;
        (!rest.starts_with("//") && self.table.contains(scheme)).then_some(scheme)
    }

    /// Resolver for a document containing `iris`.
    ///
    /// Any prefix named like the scheme of an IRI that stays a full IRI is
    /// dropped. Dropping one can leave other IRIs unabbreviated, so this
    /// repeats until no full IRI clashes with a remaining prefix. Only IRIs
    /// for which [`shadowed_prefix`](Self::shadowed_prefix) answers need to
    /// be passed.
    pub fn for_document<'i, I>(&self, iris: I) -> Cow<'_, PrefixResolver>
    where
        I: IntoIterator<Item = &'i str>,
    {
        let iris: IndexSet<&str> = iris.into_iter().collect();
        let mut resolver = Cow::Borrowed(self);
        loop {
            let mut scratch = UsedPrefixes::new();
            let clashes: BTreeSet<&str> = iris
                .iter()
                .copied()
                .filter(|iri| resolver.resolve(iri, &mut scratch).is_none())
                .filter_map(|iri| resolver.shadowed_prefix(iri))
                .collect();
            if clashes.is_empty() {
                return resolver;
            }

            let mut table = resolver.table.clone();
            for name in clashes {
                warn!(
                    "Not abbreviating with prefix {:?}: a full IRI in the graph uses it as scheme",
                    name
                );
                table.remove(name);
            }
            resolver = Cow::Owned(PrefixResolver::new(table));
        }
    }

    /// `@context` entries for the used prefixes, plus the empty prefix when
    /// one is registered, in keyword order
    pub fn context(&self, used: &UsedPrefixes) -> Map<String, Value> {
        let mut names: Vec<&str> = used.iter().map(String::as_str).collect();
        if self.table.contains("") && !used.contains("") {
            names.push("");
        }

        let mut context = Map::new();
        for name in keyword_order(names) {
            if let Ok(iri) = self.table.get_iri(&name) {
                let iri = Value::String(iri.to_string());
                context.insert(name, iri);
            }
        }
        context
    }
}
