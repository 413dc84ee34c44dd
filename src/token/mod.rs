//! Dependency-parse token records
//!
//! One [`TokenRecord`] per parsed token, as produced by an external tagger.
//! The record stream for a whole tagging run is the input of the graph fold.

pub mod table;
pub mod upos;

pub use table::{read_tokens, read_tokens_path, write_tokens, write_tokens_path, TOKEN_COLUMNS};
pub use upos::{ParseUposError, Upos};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Head id marking the sentence root (no governor)
pub const ROOT_HEAD: u32 = 0;

/// Errors raised while reading tabular input (token tables, corpora)
#[derive(Error, Debug)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: unknown part-of-speech tag {tag:?}")]
    UnknownTag { row: usize, tag: String },

    #[error("Row {row}: malformed value {value:?} in column {column}")]
    Malformed {
        row: usize,
        column: String,
        value: String,
    },
}

pub type InputResult<T> = Result<T, InputError>;

/// A single token of a dependency-parsed sentence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Document the token belongs to
    pub doc_id: u64,
    /// Sentence within the document
    pub sentence_id: u32,
    /// 1-based position within the sentence
    pub token_id: u32,
    /// `token_id` of the governor in the same sentence, or [`ROOT_HEAD`]
    pub head_token_id: u32,
    /// Normalized word form
    pub lemma: String,
    /// Part-of-speech tag
    pub upos: Upos,
}

impl TokenRecord {
    pub fn new(
        doc_id: u64,
        sentence_id: u32,
        token_id: u32,
        head_token_id: u32,
        lemma: impl Into<String>,
        upos: Upos,
    ) -> Self {
        TokenRecord {
            doc_id,
            sentence_id,
            token_id,
            head_token_id,
            lemma: lemma.into(),
            upos,
        }
    }

    /// True when this token is its sentence's root
    pub fn is_root(&self) -> bool {
        self.head_token_id == ROOT_HEAD
    }

    /// Key identifying the sentence this token lives in
    pub fn sentence_key(&self) -> (u64, u32) {
        (self.doc_id, self.sentence_id)
    }
}
