//! Connected components of the undirected projection
//!
//! A corpus vocabulary graph usually has one large component of related
//! terms plus fragments, and a long tail of isolated lemmas that never take
//! part in a relation.

use super::common::{GraphView, NodeId};
use std::collections::VecDeque;

/// Component labelling of a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    /// Component of each dense node index
    pub labels: Vec<usize>,
    /// Node count of each component, by label
    pub sizes: Vec<usize>,
}

impl Components {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Size of the largest component, 0 for an empty graph
    pub fn largest(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }

    /// Number of single-node components
    pub fn isolated(&self) -> usize {
        self.sizes.iter().filter(|&&s| s == 1).count()
    }

    /// Label of the component holding `node`
    pub fn component_of(&self, view: &GraphView, node: NodeId) -> Option<usize> {
        view.node_to_index.get(&node).map(|&idx| self.labels[idx])
    }
}

/// Label components ignoring edge direction.
///
/// Labels follow the smallest node index in each component, so the
/// labelling is deterministic for a given view.
pub fn connected_components(view: &GraphView) -> Components {
    let n = view.node_count;
    let mut labels = vec![usize::MAX; n];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..n {
        if labels[start] != usize::MAX {
            continue;
        }
        let label = sizes.len();
        labels[start] = label;
        queue.push_back(start);
        let mut size = 0;

        while let Some(u) = queue.pop_front() {
            size += 1;
            for v in view.undirected_neighbors(u) {
                if labels[v] == usize::MAX {
                    labels[v] = label;
                    queue.push_back(v);
                }
            }
        }
        sizes.push(size);
    }

    Components { labels, sizes }
}
