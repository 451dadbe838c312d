//! Blank node relabelling for one serialization pass

use crate::rdf::BlankNode;
use std::collections::HashMap;

/// Assigns `_:b0`, `_:b1`, ... to blank nodes in first-encounter order.
///
/// Lives for a single document; the same input label always maps to the
/// same output label within that document, and two input labels never
/// share an output label.
#[derive(Debug, Clone)]
pub struct BlankNodeRenamer {
    stem: BlankNode,
    assigned: HashMap<BlankNode, BlankNode>,
}

impl BlankNodeRenamer {
    /// Renamer producing labels `stem0`, `stem1`, ...
    pub fn new(stem: BlankNode) -> Self {
        Self {
            stem,
            assigned: HashMap::new(),
        }
    }

    /// Output label for `node`, allocating the next one on first sight
    pub fn rename(&mut self, node: &BlankNode) -> BlankNode {
        if let Some(existing) = self.assigned.get(node) {
            return existing.clone();
        }
        let fresh = self.stem.numbered(self.assigned.len());
        self.assigned.insert(node.clone(), fresh.clone());
        fresh
    }

    /// Number of labels handed out so far
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// Check if no label was handed out yet
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

impl Default for BlankNodeRenamer {
    fn default() -> Self {
        Self::new(BlankNode::from_str("b").unwrap_or_default())
    }
}
