//! Corpus loading and the tagger seam
//!
//! A corpus is a delimited file of documents with at least one text column
//! (by default `abstract`). Column names are normalized and incomplete rows
//! are dropped before anything reaches the tagger.

use crate::token::{InputError, InputResult, TokenRecord};
use csv::{ReaderBuilder, Trim};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default text column of a patent-abstract corpus
pub const DEFAULT_TEXT_COLUMN: &str = "abstract";

/// A single corpus document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// 0-based position among retained rows
    pub id: u64,
    /// Document text
    pub text: String,
}

/// A cleaned document collection
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Normalized column names of the source table
    pub columns: Vec<String>,
    /// Retained documents
    pub documents: Vec<Document>,
    /// Rows dropped because a field was empty
    pub dropped_rows: usize,
}

impl Corpus {
    /// Load a corpus from a reader, taking text from `text_column`
    pub fn from_reader<R: Read>(reader: R, text_column: &str) -> InputResult<Self> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).flexible(true).from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(normalize_column).collect();
        let wanted = normalize_column(text_column);
        let text_idx = columns
            .iter()
            .position(|c| *c == wanted)
            .ok_or(InputError::MissingColumn(wanted))?;

        let mut documents = Vec::new();
        let mut dropped_rows = 0;
        for result in rdr.records() {
            let record = result?;
            let complete = record.len() == columns.len() && record.iter().all(|f| !f.is_empty());
            if !complete {
                dropped_rows += 1;
                continue;
            }
            documents.push(Document {
                id: documents.len() as u64,
                text: record[text_idx].to_string(),
            });
        }

        if dropped_rows > 0 {
            warn!("Dropped {} incomplete corpus rows", dropped_rows);
        }
        info!("Loaded corpus with {} documents", documents.len());

        Ok(Corpus {
            columns,
            documents,
            dropped_rows,
        })
    }

    /// Load a corpus from a file
    pub fn from_path(path: impl AsRef<Path>, text_column: &str) -> InputResult<Self> {
        Self::from_reader(File::open(path)?, text_column)
    }

    /// Document texts in corpus order
    pub fn texts(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Tag every document with the given tagger
    pub fn tag<T: Tagger + ?Sized>(&self, tagger: &T) -> InputResult<Vec<TokenRecord>> {
        tagger.tag(&self.texts())
    }
}

/// Dependency parser producing token records.
///
/// Implementations must number documents by their position in `documents`
/// and follow the [`TokenRecord`] conventions (1-based token ids, head 0 for
/// the sentence root).
pub trait Tagger {
    fn tag(&self, documents: &[&str]) -> InputResult<Vec<TokenRecord>>;
}

/// Normalize a column header: trim, lowercase, collapse runs of
/// non-alphanumerics into `_`.
pub fn normalize_column(name: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let re = SEPARATORS.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid separator pattern"));
    let lowered = name.trim().to_lowercase();
    re.replace_all(&lowered, "_").trim_matches('_').to_string()
}
