//! Deterministic orderings for keys and candidate terms

use std::cmp::Ordering;

/// JSON-LD keywords that sort ahead of every other key, highest priority first
pub const KEYWORD_ORDER: &[&str] = &[
    "@base",
    "@id",
    "@value",
    "@type",
    "@language",
    "@vocab",
    "@container",
    "@graph",
    "@list",
    "@set",
    "@index",
];

fn keyword_rank(key: &str) -> Option<usize> {
    KEYWORD_ORDER.iter().position(|kw| *kw == key)
}

/// Keywords first in [`KEYWORD_ORDER`] priority, then plain byte order.
pub fn keyword_cmp(a: &str, b: &str) -> Ordering {
    match (keyword_rank(a), keyword_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Shorter first, then plain byte order.
pub fn term_cmp(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Sort keys with [`keyword_cmp`]
pub fn keyword_order<I, S>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut keys: Vec<String> = keys.into_iter().map(Into::into).collect();
    keys.sort_by(|a, b| keyword_cmp(a, b));
    keys
}

/// Sort candidate terms with [`term_cmp`]
pub fn term_order<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
    candidates.sort_by(|a, b| term_cmp(a, b));
    candidates
}
