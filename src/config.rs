//! Run configuration
//!
//! Built-in defaults, optionally overlaid by a YAML file. The binary applies
//! command-line and environment overrides on top.

use crate::graph::DEFAULT_PROVIDED_BY;
use crate::normalize::{
    NodeNormClient, NormalizeResult, RetryPolicy, UnknownCategoryPolicy, DEFAULT_BATCH_SIZE,
    DEFAULT_NORMALIZER_URL,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Where the PhenX toolkit publishes the cross-reference workbook
pub const DEFAULT_SOURCE_URL: &str =
    "https://www.phenxtoolkit.org/toolkit_content/documents/resources/Protocol_cross_reference.xlsx";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DIGEST_FILE: &str = "current.sha256";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for the node normalization service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub url: String,
    /// Curies per request
    pub batch_size: usize,
    /// Attempts per batch, including the first
    pub max_attempts: u32,
    /// Statuses that trigger another attempt
    pub retry_statuses: Vec<u16>,
    /// Per-request timeout; unset waits indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            url: DEFAULT_NORMALIZER_URL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_attempts: retry.max_attempts,
            retry_statuses: retry.retry_statuses,
            timeout_secs: None,
        }
    }
}

impl NormalizerConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            retry_statuses: self.retry_statuses.clone(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// HTTP client configured from these settings
    pub fn build_client(&self) -> NormalizeResult<NodeNormClient> {
        Ok(NodeNormClient::with_timeout(&self.url, self.timeout())?
            .with_retry_policy(self.retry_policy()))
    }
}

/// Everything a conversion run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Workbook to download when `input` is not set
    pub source_url: String,
    /// Local workbook; skips the download
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    /// Downloaded workbook and output files go here
    pub data_dir: PathBuf,
    /// Sidecar file receiving the workbook's SHA-256
    pub digest_file: PathBuf,
    /// Stamped on every edge
    pub provided_by: String,
    pub normalizer: NormalizerConfig,
    pub unknown_category: UnknownCategoryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            input: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            digest_file: PathBuf::from(DEFAULT_DIGEST_FILE),
            provided_by: DEFAULT_PROVIDED_BY.to_string(),
            normalizer: NormalizerConfig::default(),
            unknown_category: UnknownCategoryPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a YAML document; keys left out keep their defaults
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Defaults, overlaid by `path` when given
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_yaml_str(&text)
            }
        }
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.normalizer.batch_size == 0 {
            return Err(ConfigError::Invalid("normalizer.batch_size must be at least 1".into()));
        }
        if self.normalizer.max_attempts == 0 {
            return Err(ConfigError::Invalid("normalizer.max_attempts must be at least 1".into()));
        }
        if self.input.is_none() && self.source_url.trim().is_empty() {
            return Err(ConfigError::Invalid("either input or source_url is required".into()));
        }
        Ok(())
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.data_dir.join("nodes.jsonl")
    }

    pub fn edges_path(&self) -> PathBuf {
        self.data_dir.join("edges.jsonl")
    }
}
