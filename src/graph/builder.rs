//! Folding dependency-parsed tokens into a lemma graph
//!
//! Each token whose head resolves inside its own sentence contributes one
//! `head -> dependent` relation between vocabulary entries. Relations are
//! mirrored for undirected graphs, aggregated per `(from, to)` pair, and the
//! resulting edge table drives node degree and display size.

use super::edge::GraphEdge;
use super::node::GraphNode;
use super::palette::color_for;
use super::types::{EdgeMode, TagPolicy, VocabId};
use super::vocab::Vocabulary;
use super::DependencyGraph;
use crate::token::{TokenRecord, Upos, ROOT_HEAD};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while folding tokens into a graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Vocabulary is empty")]
    EmptyVocabulary,

    #[error("Lemma {0:?} is not in the vocabulary")]
    UnknownLemma(String),

    #[error("Duplicate token {token_id} in document {doc_id}, sentence {sentence_id}")]
    DuplicateToken {
        doc_id: u64,
        sentence_id: u32,
        token_id: u32,
    },

    #[error("Token id 0 is reserved for the root (document {doc_id}, sentence {sentence_id})")]
    ReservedTokenId { doc_id: u64, sentence_id: u32 },

    #[error("Invalid size range: min {min}, max {max}")]
    InvalidSizeRange { min: f64, max: f64 },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Display size range nodes are rescaled into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 5.0, max: 30.0 }
    }
}

impl SizeRange {
    pub fn new(min: f64, max: f64) -> GraphResult<Self> {
        let range = SizeRange { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> GraphResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(GraphError::InvalidSizeRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Min-max rescale of degrees into the range.
    ///
    /// When every degree is equal there is no spread to scale, and every
    /// node gets `min`.
    pub fn rescale(&self, degrees: &[u64]) -> Vec<f64> {
        let (Some(&lo), Some(&hi)) = (degrees.iter().min(), degrees.iter().max()) else {
            return Vec::new();
        };

        if lo == hi {
            return vec![self.min; degrees.len()];
        }

        let spread = (hi - lo) as f64;
        degrees
            .iter()
            .map(|&d| self.min + (self.max - self.min) * (d - lo) as f64 / spread)
            .collect()
    }
}

/// Fold configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldConfig {
    /// Keep relations one-way (head -> dependent) or mirror them
    pub directed: bool,
    /// Weighted or deduplicated aggregation
    pub edge_mode: EdgeMode,
    /// Node display size range
    pub size_range: SizeRange,
    /// Representative tag selection
    pub tag_policy: TagPolicy,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            directed: true,
            edge_mode: EdgeMode::Weighted,
            size_range: SizeRange::default(),
            tag_policy: TagPolicy::MostFrequent,
        }
    }
}

impl FoldConfig {
    pub fn undirected(mut self) -> Self {
        self.directed = false;
        self
    }

    pub fn deduplicated(mut self) -> Self {
        self.edge_mode = EdgeMode::Deduplicated;
        self
    }

    pub fn with_tag_policy(mut self, policy: TagPolicy) -> Self {
        self.tag_policy = policy;
        self
    }

    pub fn with_size_range(mut self, range: SizeRange) -> Self {
        self.size_range = range;
        self
    }
}

/// Builds vocabularies and graph snapshots from token streams
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: FoldConfig,
}

impl GraphBuilder {
    pub fn new(config: FoldConfig) -> Self {
        GraphBuilder { config }
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    /// Group tokens by lemma and assign vocabulary ids
    pub fn build_vocabulary(tokens: &[TokenRecord]) -> Vocabulary {
        Vocabulary::build(tokens)
    }

    /// Fold tokens against an existing vocabulary
    pub fn fold(&self, tokens: &[TokenRecord], vocab: &Vocabulary) -> GraphResult<DependencyGraph> {
        fold(tokens, vocab, &self.config)
    }

    /// Build the vocabulary and fold in one go
    pub fn build(&self, tokens: &[TokenRecord]) -> GraphResult<(Vocabulary, DependencyGraph)> {
        let vocab = Self::build_vocabulary(tokens);
        let graph = self.fold(tokens, &vocab)?;
        Ok((vocab, graph))
    }
}

/// Fold a token stream into a graph over `vocab`
pub fn fold(
    tokens: &[TokenRecord],
    vocab: &Vocabulary,
    config: &FoldConfig,
) -> GraphResult<DependencyGraph> {
    config.size_range.validate()?;
    if vocab.is_empty() {
        return Err(GraphError::EmptyVocabulary);
    }

    // Resolve every token to its lemma id, keyed by position in its sentence
    let mut positions: FxHashMap<(u64, u32, u32), VocabId> = FxHashMap::default();
    let mut lemma_ids = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.token_id == ROOT_HEAD {
            return Err(GraphError::ReservedTokenId {
                doc_id: token.doc_id,
                sentence_id: token.sentence_id,
            });
        }
        let id = vocab
            .id_of(&token.lemma)
            .ok_or_else(|| GraphError::UnknownLemma(token.lemma.clone()))?;
        let (doc_id, sentence_id) = token.sentence_key();
        if positions.insert((doc_id, sentence_id, token.token_id), id).is_some() {
            return Err(GraphError::DuplicateToken {
                doc_id: token.doc_id,
                sentence_id: token.sentence_id,
                token_id: token.token_id,
            });
        }
        lemma_ids.push(id);
    }

    // Resolve heads within the same sentence and aggregate per pair
    let mut counts: FxHashMap<(VocabId, VocabId), u64> = FxHashMap::default();
    let mut roots = 0usize;
    let mut dangling = 0usize;
    for (token, &dependent) in tokens.iter().zip(&lemma_ids) {
        if token.is_root() {
            roots += 1;
            continue;
        }
        let (doc_id, sentence_id) = token.sentence_key();
        let Some(&head) = positions.get(&(doc_id, sentence_id, token.head_token_id)) else {
            dangling += 1;
            continue;
        };
        *counts.entry((head, dependent)).or_insert(0) += 1;
        if !config.directed {
            *counts.entry((dependent, head)).or_insert(0) += 1;
        }
    }

    let mut edges: Vec<GraphEdge> = counts
        .into_iter()
        .map(|((from, to), count)| {
            let weight = match config.edge_mode {
                EdgeMode::Weighted => count,
                EdgeMode::Deduplicated => 1,
            };
            GraphEdge::new(from, to, weight)
        })
        .collect();
    edges.sort_unstable_by_key(|e| (e.from, e.to));

    let self_loops = edges.iter().filter(|e| e.is_self_loop()).count();
    let degrees = endpoint_degrees(&edges, vocab.len(), config.directed);
    let tags = representative_tags(tokens, &lemma_ids, vocab.len(), config.tag_policy);
    let sizes = config.size_range.rescale(&degrees);

    let nodes: Vec<GraphNode> = vocab
        .iter()
        .map(|(id, lemma)| {
            let i = id.index();
            // Entries never seen in this token stream fall back to X
            let upos = tags[i].unwrap_or(Upos::X);
            GraphNode {
                id,
                label: lemma.to_string(),
                upos,
                degree: degrees[i],
                size: sizes[i],
                color: color_for(upos).to_string(),
            }
        })
        .collect();

    debug!(
        "Folded {} tokens: {} nodes, {} {} edges, {} self-loops, {} roots, {} dangling heads",
        tokens.len(),
        nodes.len(),
        edges.len(),
        config.edge_mode,
        self_loops,
        roots,
        dangling
    );

    Ok(DependencyGraph {
        directed: config.directed,
        edge_mode: config.edge_mode,
        nodes,
        edges,
    })
}

/// Count each id's occurrences across both endpoints of the relation table.
///
/// An edge stands for `weight` relation rows: its occurrence count in
/// weighted mode, a single row once deduplicated. Undirected tables hold
/// every relation in both directions, so each endpoint is seen twice and
/// the count is halved.
fn endpoint_degrees(edges: &[GraphEdge], node_count: usize, directed: bool) -> Vec<u64> {
    let mut degrees = vec![0u64; node_count];
    for edge in edges {
        degrees[edge.from.index()] += edge.weight;
        degrees[edge.to.index()] += edge.weight;
    }
    if !directed {
        for d in &mut degrees {
            *d /= 2;
        }
    }
    degrees
}

fn representative_tags(
    tokens: &[TokenRecord],
    lemma_ids: &[VocabId],
    node_count: usize,
    policy: TagPolicy,
) -> Vec<Option<Upos>> {
    match policy {
        TagPolicy::FirstSeen => {
            let mut tags = vec![None; node_count];
            for (token, id) in tokens.iter().zip(lemma_ids) {
                tags[id.index()].get_or_insert(token.upos);
            }
            tags
        }
        TagPolicy::MostFrequent => {
            let mut counts = vec![[0u32; 17]; node_count];
            for (token, id) in tokens.iter().zip(lemma_ids) {
                counts[id.index()][token.upos.index()] += 1;
            }
            counts
                .iter()
                .map(|row| {
                    // Strict comparison keeps the lexically smallest tag on ties
                    let mut best: Option<(Upos, u32)> = None;
                    for tag in Upos::ALL {
                        let n = row[tag.index()];
                        if n > 0 && best.map_or(true, |(_, m)| n > m) {
                            best = Some((tag, n));
                        }
                    }
                    best.map(|(tag, _)| tag)
                })
                .collect()
        }
    }
}
