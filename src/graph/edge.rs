//! Graph edge: an aggregated head -> dependent relation between lemmas

use super::types::VocabId;
use serde::{Deserialize, Serialize};

/// A directed, aggregated relation between two vocabulary entries.
///
/// `weight` is the relation count in weighted mode and always 1 in
/// deduplicated mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Governing lemma
    pub from: VocabId,
    /// Dependent lemma
    pub to: VocabId,
    /// Aggregated relation count
    pub weight: u64,
}

impl GraphEdge {
    pub fn new(from: VocabId, to: VocabId, weight: u64) -> Self {
        GraphEdge { from, to, weight }
    }

    /// True for relations between two occurrences of the same lemma
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// The same relation pointing the other way
    pub fn reversed(&self) -> Self {
        GraphEdge {
            from: self.to,
            to: self.from,
            weight: self.weight,
        }
    }
}

/// An edge with lemma labels instead of ids, as consumed by embedding trainers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledEdge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}
