//! Term embeddings
//!
//! Embeddings are trained outside this crate (node2vec over the labeled
//! edge list). This module owns the term-keyed table, its on-disk cache and
//! similarity lookups.

pub mod cache;
pub mod table;

pub use cache::{EmbeddingCache, EmbeddingConfig};
pub use table::EmbeddingTable;

use crate::graph::LabeledEdge;
use thiserror::Error;

/// Embed errors
#[derive(Error, Debug)]
pub enum EmbedError {
    /// I/O error while reading or writing the cache
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-file error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Vector length differs from the table's dimension
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Non-numeric cell in the cache file
    #[error("Row {row}: cannot parse {value:?} as a number")]
    Parse { row: usize, value: String },

    /// Lookup of a term missing from the table
    #[error("Unknown term: {0}")]
    UnknownTerm(String),

    /// Error reported by the external trainer
    #[error("Training error: {0}")]
    Training(String),
}

pub type EmbedResult<T> = Result<T, EmbedError>;

/// External embedding method (e.g. node2vec) trained on a labeled edge list
pub trait EmbeddingTrainer {
    fn train(&self, edges: &[LabeledEdge]) -> EmbedResult<EmbeddingTable>;
}
