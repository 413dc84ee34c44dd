//! Pipeline configuration
//!
//! Loaded from YAML. Every field has a default, so a partial file (or no
//! file at all) is valid.

use crate::algo::AnalyticsConfig;
use crate::corpus::DEFAULT_TEXT_COLUMN;
use crate::embed::EmbeddingConfig;
use crate::graph::{FoldConfig, GraphError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] GraphError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for one corpus -> graph -> analytics run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Corpus column holding document text
    pub text_column: String,
    /// Graph folding
    pub fold: FoldConfig,
    /// Graph analytics
    pub analytics: AnalyticsConfig,
    /// Embedding cache
    pub embedding: EmbeddingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            fold: FoldConfig::default(),
            analytics: AnalyticsConfig::default(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.fold.size_range.validate()?;
        Ok(())
    }
}
