//! Term-keyed embedding table and its delimited file format
//!
//! File layout: header `term,0,1,..,d-1`, then one row per term.

use super::{EmbedError, EmbedResult};
use csv::{ReaderBuilder, WriterBuilder};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Ordered term -> vector mapping with a fixed dimension
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingTable {
    dims: usize,
    vectors: IndexMap<String, Vec<f32>>,
}

impl EmbeddingTable {
    pub fn new(dims: usize) -> Self {
        EmbeddingTable {
            dims,
            vectors: IndexMap::new(),
        }
    }

    /// Insert or replace a term's vector
    pub fn insert(&mut self, term: impl Into<String>, vector: Vec<f32>) -> EmbedResult<()> {
        if vector.len() != self.dims {
            return Err(EmbedError::DimensionMismatch {
                expected: self.dims,
                found: vector.len(),
            });
        }
        self.vectors.insert(term.into(), vector);
        Ok(())
    }

    pub fn get(&self, term: &str) -> Option<&[f32]> {
        self.vectors.get(term).map(Vec::as_slice)
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Terms in insertion order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }

    /// The `k` terms closest to `term` by cosine similarity, best first.
    ///
    /// Zero vectors have similarity 0 with everything.
    pub fn most_similar(&self, term: &str, k: usize) -> EmbedResult<Vec<(String, f32)>> {
        let query = self
            .get(term)
            .ok_or_else(|| EmbedError::UnknownTerm(term.to_string()))?;

        let mut scored: Vec<(String, f32)> = self
            .vectors
            .iter()
            .filter(|(other, _)| other.as_str() != term)
            .map(|(other, v)| (other.clone(), cosine(query, v)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(k);
        Ok(scored)
    }

    pub fn read<R: Read>(reader: R) -> EmbedResult<Self> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        let dims = rdr.headers()?.len().saturating_sub(1);
        let mut table = EmbeddingTable::new(dims);

        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let row = i + 2;
            let mut fields = record.iter();
            let term = fields.next().unwrap_or_default();
            let vector = fields
                .map(|cell| {
                    cell.trim().parse::<f32>().map_err(|_| EmbedError::Parse {
                        row,
                        value: cell.to_string(),
                    })
                })
                .collect::<EmbedResult<Vec<f32>>>()?;
            table.insert(term, vector)?;
        }
        Ok(table)
    }

    pub fn read_path(path: impl AsRef<Path>) -> EmbedResult<Self> {
        Self::read(File::open(path)?)
    }

    pub fn write<W: Write>(&self, writer: W) -> EmbedResult<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        let header: Vec<String> = std::iter::once("term".to_string())
            .chain((0..self.dims).map(|d| d.to_string()))
            .collect();
        wtr.write_record(&header)?;

        for (term, vector) in &self.vectors {
            let row: Vec<String> = std::iter::once(term.clone())
                .chain(vector.iter().map(|x| x.to_string()))
                .collect();
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_path(&self, path: impl AsRef<Path>) -> EmbedResult<()> {
        self.write(File::create(path)?)
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}
