//! Lemmagraph
//!
//! Folds dependency-parsed corpora into vocabulary-level graphs and runs
//! graph analytics over them.
//!
//! # Pipeline
//!
//! - A [`Tagger`] (an external dependency parser) turns documents into [`TokenRecord`]s
//! - [`GraphBuilder`] groups tokens into a [`Vocabulary`] and folds head/dependent
//!   relations into a [`DependencyGraph`] (weighted or deduplicated, directed or not)
//! - [`algo::summarize`] reports density, transitivity, components and PageRank terms
//! - The graph exports as node/edge lists; embeddings trained on the labeled
//!   edge list are cached through [`EmbeddingCache`]
//!
//! ## Example Usage
//!
//! ```rust
//! use lemmagraph::{FoldConfig, GraphBuilder, TokenRecord, Upos};
//!
//! let tokens = vec![
//!     TokenRecord::new(0, 0, 1, 2, "The", Upos::Det),
//!     TokenRecord::new(0, 0, 2, 3, "cat", Upos::Noun),
//!     TokenRecord::new(0, 0, 3, 0, "sat", Upos::Verb),
//! ];
//!
//! let builder = GraphBuilder::new(FoldConfig::default());
//! let (vocab, graph) = builder.build(&tokens).unwrap();
//!
//! let cat = vocab.id_of("cat").unwrap();
//! assert_eq!(graph.node(cat).unwrap().degree, 2);
//! assert_eq!(graph.edge_count(), 2);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod corpus;
pub mod embed;
pub mod graph;
pub mod token;

// Re-export main types for convenience
pub use algo::{AnalyticsConfig, GraphSummary, RankedTerm};
pub use config::{ConfigError, ConfigResult, PipelineConfig};
pub use corpus::{Corpus, Document, Tagger};
pub use embed::{EmbedError, EmbedResult, EmbeddingCache, EmbeddingTable, EmbeddingTrainer};
pub use graph::{
    DependencyGraph, EdgeMode, FoldConfig, GraphBuilder, GraphEdge, GraphError, GraphNode,
    GraphResult, LabeledEdge, SizeRange, TagPolicy, VocabId, Vocabulary,
};
pub use token::{InputError, InputResult, TokenRecord, Upos};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
