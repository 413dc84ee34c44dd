//! On-disk embedding cache
//!
//! A present cache file short-circuits training unless `force_retrain` is set.

use super::{EmbedResult, EmbeddingTable, EmbeddingTrainer};
use crate::graph::LabeledEdge;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Embedding cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Cache file location
    pub cache_path: PathBuf,
    /// Retrain and overwrite even when the cache file exists
    pub force_retrain: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("embeddings.csv"),
            force_retrain: false,
        }
    }
}

/// Term embedding cache backed by a delimited file
#[derive(Debug, Clone)]
pub struct EmbeddingCache {
    path: PathBuf,
    force_retrain: bool,
}

impl EmbeddingCache {
    pub fn new(path: impl AsRef<Path>) -> Self {
        EmbeddingCache {
            path: path.as_ref().to_path_buf(),
            force_retrain: false,
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Self {
        EmbeddingCache {
            path: config.cache_path.clone(),
            force_retrain: config.force_retrain,
        }
    }

    pub fn force_retrain(mut self, force: bool) -> Self {
        self.force_retrain = force;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when a cache file is present
    pub fn is_cached(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> EmbedResult<EmbeddingTable> {
        EmbeddingTable::read_path(&self.path)
    }

    pub fn store(&self, table: &EmbeddingTable) -> EmbedResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        table.write_path(&self.path)
    }

    /// Load the cached table, or train, persist and return a fresh one
    pub fn load_or_train<T: EmbeddingTrainer + ?Sized>(
        &self,
        trainer: &T,
        edges: &[LabeledEdge],
    ) -> EmbedResult<EmbeddingTable> {
        if self.is_cached() && !self.force_retrain {
            info!("Loading cached embeddings from {:?}", self.path);
            return self.load();
        }

        info!("Training embeddings on {} edges", edges.len());
        let table = trainer.train(edges)?;
        self.store(&table)?;
        info!(
            "Cached {} embeddings of dimension {} at {:?}",
            table.len(),
            table.dims(),
            self.path
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::EmbedError;
    use std::cell::Cell;

    /// Gives every endpoint a one-hot-ish vector and counts calls
    struct CountingTrainer {
        calls: Cell<usize>,
    }

    impl EmbeddingTrainer for CountingTrainer {
        fn train(&self, edges: &[LabeledEdge]) -> EmbedResult<EmbeddingTable> {
            self.calls.set(self.calls.get() + 1);
            let mut table = EmbeddingTable::new(2);
            for edge in edges {
                table.insert(edge.from.clone(), vec![1.0, edge.weight as f32])?;
                table.insert(edge.to.clone(), vec![0.0, edge.weight as f32])?;
            }
            Ok(table)
        }
    }

    struct FailingTrainer;

    impl EmbeddingTrainer for FailingTrainer {
        fn train(&self, _edges: &[LabeledEdge]) -> EmbedResult<EmbeddingTable> {
            Err(EmbedError::Training("walks exhausted".to_string()))
        }
    }

    fn edges() -> Vec<LabeledEdge> {
        vec![LabeledEdge {
            from: "sat".to_string(),
            to: "cat".to_string(),
            weight: 1.0,
        }]
    }

    #[test]
    fn test_cache_short_circuits_training() {
        let dir = tempfile::tempdir().unwrap();
        let cache = EmbeddingCache::new(dir.path().join("nested").join("emb.csv"));
        let trainer = CountingTrainer { calls: Cell::new(0) };

        assert!(!cache.is_cached());
        let first = cache.load_or_train(&trainer, &edges()).unwrap();
        assert!(cache.is_cached());
        let second = cache.load_or_train(&trainer, &edges()).unwrap();

        assert_eq!(trainer.calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(second.get("cat"), Some(&[0.0, 1.0][..]));
    }

    #[test]
    fn test_force_retrain() {
        let dir = tempfile::tempdir().unwrap();
        let cache = EmbeddingCache::new(dir.path().join("emb.csv")).force_retrain(true);
        let trainer = CountingTrainer { calls: Cell::new(0) };

        cache.load_or_train(&trainer, &edges()).unwrap();
        cache.load_or_train(&trainer, &edges()).unwrap();
        assert_eq!(trainer.calls.get(), 2);
    }

    #[test]
    fn test_training_error_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = EmbeddingConfig {
            cache_path: dir.path().join("emb.csv"),
            force_retrain: false,
        };
        let cache = EmbeddingCache::from_config(&config);
        assert!(matches!(
            cache.load_or_train(&FailingTrainer, &edges()),
            Err(EmbedError::Training(_))
        ));
        assert!(!cache.is_cached());
    }
}
