//! PageRank node centrality
//!
//! Unweighted PageRank splits a node's score evenly over its successors.
//! The weighted variant (TextRank-style keyword ranking) splits it in
//! proportion to edge weight.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Maximum number of iterations
    pub iterations: usize,
    /// Stop once the summed absolute change drops below this
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 20,
            tolerance: 0.0001,
        }
    }
}

/// Calculate PageRank for the graph view
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> HashMap<NodeId, f64> {
    iterate(view, config, |scores, i| {
        let mut sum_incoming = 0.0;
        for &source_idx in view.predecessors(i) {
            let out_degree = view.out_degree(source_idx);
            if out_degree > 0 {
                sum_incoming += scores[source_idx] / out_degree as f64;
            }
        }
        sum_incoming
    })
}

/// Calculate weighted PageRank for the graph view.
///
/// Falls back to [`page_rank`] when the view carries no weights.
pub fn weighted_page_rank(view: &GraphView, config: PageRankConfig) -> HashMap<NodeId, f64> {
    if view.in_weights.is_none() {
        return page_rank(view, config);
    }

    let strengths: Vec<f64> = (0..view.node_count).map(|i| view.out_strength(i)).collect();

    iterate(view, config, |scores, i| {
        let weights = view.in_weights(i).unwrap_or(&[]);
        let mut sum_incoming = 0.0;
        for (&source_idx, &w) in view.predecessors(i).iter().zip(weights) {
            let strength = strengths[source_idx];
            if strength > 0.0 {
                sum_incoming += scores[source_idx] * w / strength;
            }
        }
        sum_incoming
    })
}

fn iterate<F>(view: &GraphView, config: PageRankConfig, incoming: F) -> HashMap<NodeId, f64>
where
    F: Fn(&[f64], usize) -> f64,
{
    let n = view.node_count;

    if n == 0 {
        return HashMap::new();
    }

    // Initial score is 1.0 for all nodes
    let mut scores = vec![1.0; n];
    let mut next_scores = vec![0.0; n];

    let d = config.damping_factor;
    let base_score = 1.0 - d;

    for _ in 0..config.iterations {
        let mut total_diff = 0.0;

        for i in 0..n {
            next_scores[i] = base_score + d * incoming(&scores, i);
            total_diff += (next_scores[i] - scores[i]).abs();
        }

        // Swap buffers
        scores.copy_from_slice(&next_scores);

        if total_diff < config.tolerance {
            break;
        }
    }

    let mut result = HashMap::with_capacity(n);
    for (idx, score) in scores.into_iter().enumerate() {
        result.insert(view.index_to_node[idx], score);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> GraphView {
        // Center 1 <-> 2, 1 <-> 3
        GraphView::from_edges(
            &[1, 2, 3],
            vec![(1, 2, 1.0), (1, 3, 1.0), (2, 1, 1.0), (3, 1, 1.0)],
            true,
        )
    }

    #[test]
    fn test_center_ranks_highest() {
        let scores = page_rank(&star(), PageRankConfig::default());
        assert_eq!(scores.len(), 3);
        assert!(scores[&1] > scores[&2]);
        assert!((scores[&2] - scores[&3]).abs() < 1e-9);
        assert!(scores[&1] > 1.0);
    }

    #[test]
    fn test_empty_view() {
        let view = GraphView::from_edges(&[], Vec::new(), false);
        assert!(page_rank(&view, PageRankConfig::default()).is_empty());
    }

    #[test]
    fn test_weighted_prefers_heavy_edge() {
        // 1 -> 2 (weight 9), 1 -> 3 (weight 1)
        let view = GraphView::from_edges(&[1, 2, 3], vec![(1, 2, 9.0), (1, 3, 1.0)], true);
        let scores = weighted_page_rank(&view, PageRankConfig::default());
        assert!(scores[&2] > scores[&3]);

        // Unweighted ranking treats both successors alike
        let plain = page_rank(&view, PageRankConfig::default());
        assert!((plain[&2] - plain[&3]).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_without_weights_matches_plain() {
        let view = GraphView::from_edges(&[1, 2], vec![(1, 2, 5.0)], false);
        let a = weighted_page_rank(&view, PageRankConfig::default());
        let b = page_rank(&view, PageRankConfig::default());
        assert_eq!(a, b);
    }
}
