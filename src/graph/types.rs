//! Core type definitions for the lemma graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a vocabulary entry (and of its graph node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct VocabId(pub u64);

impl VocabId {
    pub fn new(id: u64) -> Self {
        VocabId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Dense index into per-node tables
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VocabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VocabId({})", self.0)
    }
}

impl From<u64> for VocabId {
    fn from(id: u64) -> Self {
        VocabId(id)
    }
}

/// How relations sharing a `(from, to)` pair are aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// One edge per pair, weighted by the number of relations
    #[default]
    Weighted,
    /// One unweighted edge per pair, multiplicity discarded
    Deduplicated,
}

impl fmt::Display for EdgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeMode::Weighted => write!(f, "weighted"),
            EdgeMode::Deduplicated => write!(f, "deduplicated"),
        }
    }
}

/// How a lemma's representative part-of-speech tag is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TagPolicy {
    /// Most frequent tag, ties broken by lexical order of the tag name
    #[default]
    MostFrequent,
    /// Tag of the first occurrence in input order
    FirstSeen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_id() {
        let id = VocabId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(id.index(), 42);
        assert_eq!(format!("{}", id), "VocabId(42)");

        let id2: VocabId = 100.into();
        assert!(id < id2);
    }

    #[test]
    fn test_vocab_id_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&VocabId(7)).unwrap(), "7");
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(serde_json::to_string(&EdgeMode::Deduplicated).unwrap(), "\"deduplicated\"");
        assert_eq!(serde_json::to_string(&TagPolicy::FirstSeen).unwrap(), "\"first_seen\"");
        assert_eq!(EdgeMode::default(), EdgeMode::Weighted);
    }
}
