//! Graph analytics over dense CSR views of lemma dependency graphs.

pub mod common;
pub mod components;
pub mod pagerank;
pub mod topology;

pub use common::{GraphView, NodeId};
pub use components::{connected_components, Components};
pub use pagerank::{page_rank, weighted_page_rank, PageRankConfig};
pub use topology::{count_triangles, count_triples, density, transitivity};
