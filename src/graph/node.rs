//! Graph node: one per vocabulary entry

use super::types::VocabId;
use crate::token::Upos;
use serde::{Deserialize, Serialize};

/// A lemma in the folded dependency graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Vocabulary id of the lemma
    pub id: VocabId,

    /// The lemma itself
    pub label: String,

    /// Representative part-of-speech tag
    pub upos: Upos,

    /// Number of incident edge endpoints (halved for undirected graphs)
    pub degree: u64,

    /// Degree rescaled into the display size range
    pub size: f64,

    /// Display color derived from `upos`
    pub color: String,
}

impl GraphNode {
    /// True when the lemma takes part in no relation
    pub fn is_isolated(&self) -> bool {
        self.degree == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolated() {
        let node = GraphNode {
            id: VocabId(0),
            label: "apparatus".to_string(),
            upos: Upos::Noun,
            degree: 0,
            size: 5.0,
            color: "#ff9896".to_string(),
        };
        assert!(node.is_isolated());

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["id"], 0);
        assert_eq!(json["upos"], "NOUN");
    }
}
