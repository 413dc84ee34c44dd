//! Graph analytics over folded lemma graphs
//!
//! Algorithms are implemented in the `lemmagraph-algorithms` crate.
//! This module provides the integration/adapter layer.

use crate::graph::{DependencyGraph, VocabId};
use lemmagraph_algorithms::GraphView;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Re-export algorithms
pub use lemmagraph_algorithms::{
    connected_components, count_triangles, count_triples, density, page_rank, transitivity,
    weighted_page_rank, Components, PageRankConfig,
};

/// Analytics configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// PageRank parameters
    pub page_rank: PageRankConfig,
    /// Rank with edge weights (TextRank style) instead of plain PageRank
    pub weighted: bool,
    /// Number of top-ranked terms to report
    pub top_k: usize,
    /// Keep only nouns, proper nouns, verbs and adjectives in rankings
    pub content_words_only: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            page_rank: PageRankConfig::default(),
            weighted: false,
            top_k: 10,
            content_words_only: false,
        }
    }
}

/// A ranked lemma
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTerm {
    pub id: VocabId,
    pub label: String,
    pub score: f64,
}

/// Whole-graph statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub directed: bool,
    pub density: f64,
    pub transitivity: f64,
    pub mean_degree: f64,
    pub components: usize,
    pub largest_component: usize,
    /// Lemmas sharing no relation with any other lemma
    pub isolated_terms: usize,
    pub top_terms: Vec<RankedTerm>,
}

/// Build a GraphView from a folded graph for algorithm execution.
///
/// Edge weights are carried when `weighted` is set.
pub fn build_view(graph: &DependencyGraph, weighted: bool) -> GraphView {
    let nodes: Vec<u64> = graph.nodes.iter().map(|n| n.id.as_u64()).collect();
    let arcs = graph
        .edges
        .iter()
        .map(|e| (e.from.as_u64(), e.to.as_u64(), e.weight as f64));
    GraphView::from_edges(&nodes, arcs, weighted)
}

/// Rank lemmas, highest score first (ties by id).
///
/// Scores are computed over the whole graph; `content_words_only` filters
/// the ranking afterwards.
pub fn rank_terms(graph: &DependencyGraph, config: &AnalyticsConfig) -> Vec<RankedTerm> {
    let view = build_view(graph, config.weighted);
    let scores = if config.weighted {
        weighted_page_rank(&view, config.page_rank)
    } else {
        page_rank(&view, config.page_rank)
    };

    let mut ranked: Vec<RankedTerm> = graph
        .nodes
        .iter()
        .filter(|n| !config.content_words_only || n.upos.is_content_word())
        .map(|n| RankedTerm {
            id: n.id,
            label: n.label.clone(),
            score: scores.get(&n.id.as_u64()).copied().unwrap_or(0.0),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.id.cmp(&b.id)));
    ranked
}

/// Compute density, transitivity, components and top PageRank terms
pub fn summarize(graph: &DependencyGraph, config: &AnalyticsConfig) -> GraphSummary {
    let view = build_view(graph, false);
    let components = connected_components(&view);

    let mut top_terms = rank_terms(graph, config);
    top_terms.truncate(config.top_k);

    let summary = GraphSummary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        directed: graph.directed,
        density: density(&view, graph.directed),
        transitivity: transitivity(&view),
        mean_degree: graph.mean_degree(),
        components: components.count(),
        largest_component: components.largest(),
        isolated_terms: components.isolated(),
        top_terms,
    };
    debug!(
        "Summary: {} nodes, {} edges, density {:.4}, transitivity {:.4}",
        summary.nodes, summary.edges, summary.density, summary.transitivity
    );
    summary
}
