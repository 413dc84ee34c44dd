//! Lemma dependency graph
//!
//! This module implements the fold from token records to a vocabulary-level graph:
//! - Vocabulary construction with stable, injective ids
//! - Head resolution within each sentence, optional mirroring for undirected graphs
//! - Weighted or deduplicated edge aggregation
//! - Node degree, representative tag, display size and color

pub mod builder;
pub mod edge;
pub mod export;
pub mod node;
pub mod palette;
pub mod types;
pub mod vocab;

// Re-export main types
pub use builder::{fold, FoldConfig, GraphBuilder, GraphError, GraphResult, SizeRange};
pub use edge::{GraphEdge, LabeledEdge};
pub use node::GraphNode;
pub use palette::{color_for, UPOS_PALETTE};
pub use types::{EdgeMode, TagPolicy, VocabId};
pub use vocab::Vocabulary;

use serde::{Deserialize, Serialize};

/// Immutable snapshot produced by a fold.
///
/// `nodes` is indexed by vocabulary id; `edges` is sorted by `(from, to)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub directed: bool,
    pub edge_mode: EdgeMode,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get a node by id
    pub fn node(&self, id: VocabId) -> Option<&GraphNode> {
        self.nodes.get(id.index()).filter(|n| n.id == id)
    }

    /// Lemma of a node
    pub fn label(&self, id: VocabId) -> Option<&str> {
        self.node(id).map(|n| n.label.as_str())
    }

    /// Sum of edge weights
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Edges leaving a node
    pub fn outgoing(&self, id: VocabId) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    /// Edges entering a node
    pub fn incoming(&self, id: VocabId) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.to == id)
    }

    /// Mean node degree, 0.0 for an empty graph
    pub fn mean_degree(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        self.nodes.iter().map(|n| n.degree as f64).sum::<f64>() / self.nodes.len() as f64
    }

    /// Nodes sorted by descending degree, ties by id
    pub fn top_by_degree(&self, k: usize) -> Vec<&GraphNode> {
        let mut nodes: Vec<&GraphNode> = self.nodes.iter().collect();
        nodes.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.id.cmp(&b.id)));
        nodes.truncate(k);
        nodes
    }
}
