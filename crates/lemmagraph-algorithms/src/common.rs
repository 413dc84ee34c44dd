//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of a lemma graph's topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (the vocabulary id of a lemma)
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<f64>>,
    /// Edge weights: aligned with `in_sources`
    pub in_weights: Option<Vec<f64>>,
}

impl GraphView {
    /// Build a view from a node list and `(source, target, weight)` arcs.
    ///
    /// Arcs naming a node outside `nodes` are skipped. Weights are kept only
    /// when `weighted` is set.
    pub fn from_edges(
        nodes: &[NodeId],
        edges: impl IntoIterator<Item = (NodeId, NodeId, f64)>,
        weighted: bool,
    ) -> Self {
        let node_count = nodes.len();
        let mut index_to_node = Vec::with_capacity(node_count);
        let mut node_to_index = HashMap::with_capacity(node_count);
        for (idx, &node_id) in nodes.iter().enumerate() {
            index_to_node.push(node_id);
            node_to_index.insert(node_id, idx);
        }

        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut out_w: Vec<Vec<f64>> = vec![Vec::new(); node_count];
        let mut in_w: Vec<Vec<f64>> = vec![Vec::new(); node_count];

        for (source, target, weight) in edges {
            let (Some(&u), Some(&v)) = (node_to_index.get(&source), node_to_index.get(&target))
            else {
                continue;
            };
            outgoing[u].push(v);
            incoming[v].push(u);
            out_w[u].push(weight);
            in_w[v].push(weight);
        }

        let (weights, in_weights) = if weighted {
            (Some(out_w), Some(in_w))
        } else {
            (None, None)
        };

        Self::from_adjacency_list(
            node_count,
            index_to_node,
            node_to_index,
            outgoing,
            incoming,
            weights,
            in_weights,
        )
    }

    /// Total number of arcs in the view
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Get weights for outgoing edges of a node
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.out_offsets[idx];
            let end = self.out_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Get weights for incoming edges of a node
    pub fn in_weights(&self, idx: usize) -> Option<&[f64]> {
        self.in_weights.as_ref().map(|w| {
            let start = self.in_offsets[idx];
            let end = self.in_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Sum of outgoing weights of a node, falling back to the out-degree when unweighted
    pub fn out_strength(&self, idx: usize) -> f64 {
        match self.weights(idx) {
            Some(w) => w.iter().sum(),
            None => self.out_degree(idx) as f64,
        }
    }

    /// Sorted, self-loop free neighbour set ignoring direction
    pub fn undirected_neighbors(&self, idx: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .successors(idx)
            .iter()
            .chain(self.predecessors(idx).iter())
            .copied()
            .filter(|&n| n != idx)
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Helper to create GraphView from adjacency lists
    pub fn from_adjacency_list(
        node_count: usize,
        index_to_node: Vec<NodeId>,
        node_to_index: HashMap<NodeId, usize>,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
        weights: Option<Vec<Vec<f64>>>,
        in_weights: Option<Vec<Vec<f64>>>,
    ) -> Self {
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            weights: weights.map(|rows| rows.into_iter().flatten().collect()),
            in_weights: in_weights.map(|rows| rows.into_iter().flatten().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_csr_layout() {
        // 10 -> 20, 10 -> 30, 30 -> 10
        let view = GraphView::from_edges(
            &[10, 20, 30],
            vec![(10, 20, 2.0), (10, 30, 1.0), (30, 10, 4.0)],
            true,
        );

        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);
        assert_eq!(view.successors(0), &[1, 2]);
        assert_eq!(view.predecessors(0), &[2]);
        assert_eq!(view.weights(0), Some(&[2.0, 1.0][..]));
        assert_eq!(view.in_weights(0), Some(&[4.0][..]));
        assert_eq!(view.out_strength(0), 3.0);
    }

    #[test]
    fn test_from_edges_skips_unknown_nodes() {
        let view = GraphView::from_edges(&[1, 2], vec![(1, 2, 1.0), (2, 99, 1.0)], false);
        assert_eq!(view.edge_count(), 1);
        assert!(view.weights.is_none());
        assert_eq!(view.out_strength(0), 1.0);
    }

    #[test]
    fn test_undirected_neighbors_dedup_and_self_loops() {
        // 1 <-> 2, 1 -> 1
        let view = GraphView::from_edges(
            &[1, 2],
            vec![(1, 2, 1.0), (2, 1, 1.0), (1, 1, 1.0)],
            false,
        );
        assert_eq!(view.undirected_neighbors(0), vec![1]);
        assert_eq!(view.undirected_neighbors(1), vec![0]);
    }
}
