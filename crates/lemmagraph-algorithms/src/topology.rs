//! Graph topology analysis algorithms
//!
//! Triangle counting, transitivity and density. All of these look at the
//! undirected projection of the view unless told otherwise, and ignore
//! self-loops when counting triangles or triples.

use super::common::GraphView;
use rayon::prelude::*;
use std::collections::HashSet;

/// Triangle Counting
///
/// Returns total number of triangles in the graph.
/// Direction is ignored, each triangle is counted once.
pub fn count_triangles(view: &GraphView) -> usize {
    let neighbors: Vec<Vec<usize>> = (0..view.node_count)
        .map(|u| view.undirected_neighbors(u))
        .collect();

    // Only consider node indices u < v < w to avoid overcounting
    (0..view.node_count)
        .into_par_iter()
        .map(|u| {
            let u_neighbors: HashSet<usize> = neighbors[u].iter().copied().collect();
            let mut count = 0;
            for &v in neighbors[u].iter().filter(|&&v| v > u) {
                for &w in neighbors[v].iter().filter(|&&w| w > v) {
                    if u_neighbors.contains(&w) {
                        count += 1;
                    }
                }
            }
            count
        })
        .sum()
}

/// Number of connected triples (paths of length two) in the undirected projection
pub fn count_triples(view: &GraphView) -> usize {
    (0..view.node_count)
        .map(|u| {
            let d = view.undirected_neighbors(u).len();
            d * d.saturating_sub(1) / 2
        })
        .sum()
}

/// Global clustering coefficient: `3 * triangles / triples`.
///
/// Returns 0.0 for graphs without any connected triple.
pub fn transitivity(view: &GraphView) -> f64 {
    let triples = count_triples(view);
    if triples == 0 {
        return 0.0;
    }
    3.0 * count_triangles(view) as f64 / triples as f64
}

/// Edge density.
///
/// Directed: `m / (n (n - 1))` over arcs. Undirected: `2m / (n (n - 1))`
/// where `m` counts each unordered pair once, so a mirrored arc pair is a
/// single edge. Self-loops count toward `m` as in the usual definition.
/// Graphs with fewer than two nodes have density 0.0.
pub fn density(view: &GraphView, directed: bool) -> f64 {
    let n = view.node_count;
    if n < 2 {
        return 0.0;
    }
    let possible = (n * (n - 1)) as f64;

    if directed {
        return view.edge_count() as f64 / possible;
    }

    let mut pairs = HashSet::new();
    for u in 0..n {
        for &v in view.successors(u) {
            pairs.insert((u.min(v), u.max(v)));
        }
    }
    2.0 * pairs.len() as f64 / possible
}
