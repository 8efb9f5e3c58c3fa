//! Conversion pipeline
//!
//! Stages run strictly in sequence, each taking the previous stage's output
//! by reference and returning a new collection:
//! 1. Acquire the workbook (download or local file) and record its digest
//! 2. Extract rows and build the raw graph
//! 3. Normalize nodes (offline rules + phenotype resolution)
//! 4. Rewrite edge endpoints to normalized ids
//! 5. Write `edges.jsonl` and `nodes.jsonl`

use crate::config::{ConfigError, PipelineConfig};
use crate::graph::{build_graph, rewrite_edges, BuildStats, EdgeId, GraphError, NormalizedNode, RawEdge};
use crate::normalize::{normalize_nodes, BucketCounts, NodeNormalizer, NormalizeError, PhenotypeResolver};
use crate::output::{write_jsonl, OutputError};
use crate::source::{self, Row, SourceError};
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can abort a run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// The converted graph, ready to serialize
#[derive(Debug, Clone, Default)]
pub struct KgxGraph {
    /// Keyed by source key
    pub nodes: IndexMap<String, NormalizedNode>,
    /// Endpoints already rewritten to normalized ids
    pub edges: IndexMap<EdgeId, RawEdge>,
    pub build: BuildStats,
    pub counts: BucketCounts,
    pub unresolved: Vec<String>,
    pub dropped: Vec<String>,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub source: PathBuf,
    pub digest: String,
    pub build: BuildStats,
    pub counts: BucketCounts,
    pub unresolved: Vec<String>,
    pub nodes_written: usize,
    pub edges_written: usize,
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
}

/// Drives one full rebuild from workbook to KGX files
pub struct Pipeline {
    config: PipelineConfig,
    resolver: PhenotypeResolver,
}

impl Pipeline {
    /// Create a pipeline that resolves phenotypes through `normalizer`
    pub fn new(config: PipelineConfig, normalizer: Arc<dyn NodeNormalizer>) -> Self {
        let resolver =
            PhenotypeResolver::new(normalizer).with_batch_size(config.normalizer.batch_size);
        Self { config, resolver }
    }

    /// Validate `config` and connect to the configured normalization service
    pub fn from_config(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        let client = config.normalizer.build_client()?;
        info!(url = client.url(), batch_size = config.normalizer.batch_size, "using node normalizer");
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build, normalize and rewrite. No file I/O; the resolver may hit the network.
    pub async fn convert<I>(&self, rows: I) -> PipelineResult<KgxGraph>
    where
        I: IntoIterator<Item = Row>,
    {
        let raw = build_graph(rows, &self.config.provided_by)?;
        let outcome =
            normalize_nodes(&raw.nodes, &self.resolver, self.config.unknown_category).await?;
        let edges = rewrite_edges(&outcome.nodes, &raw.edges)?;

        Ok(KgxGraph {
            nodes: outcome.nodes,
            edges,
            build: raw.stats,
            counts: outcome.counts,
            unresolved: outcome.unresolved,
            dropped: outcome.dropped,
        })
    }

    /// Write edges then nodes into the data directory.
    ///
    /// Returns `(nodes_written, edges_written)`.
    pub fn write(&self, graph: &KgxGraph) -> PipelineResult<(usize, usize)> {
        std::fs::create_dir_all(&self.config.data_dir).map_err(OutputError::from)?;

        let edges_path = self.config.edges_path();
        let edges_written = write_jsonl(&edges_path, graph.edges.values())?;
        info!(path = %edges_path.display(), lines = edges_written, "wrote edges");

        let nodes_path = self.config.nodes_path();
        let nodes_written = write_jsonl(&nodes_path, graph.nodes.values())?;
        info!(path = %nodes_path.display(), lines = nodes_written, "wrote nodes");

        Ok((nodes_written, edges_written))
    }

    /// Local input if configured, otherwise download into the data directory
    pub async fn acquire(&self, http: &reqwest::Client) -> PipelineResult<PathBuf> {
        match &self.config.input {
            Some(path) => {
                info!(path = %path.display(), "using local source file");
                Ok(path.clone())
            }
            None => Ok(source::download(http, &self.config.source_url, &self.config.data_dir).await?),
        }
    }

    /// Run every stage end to end
    pub async fn run(&self, http: &reqwest::Client) -> PipelineResult<RunReport> {
        let source_path = self.acquire(http).await?;

        let digest = source::file_digest(&source_path)?;
        source::write_digest(&self.config.digest_file, &digest)?;
        info!(%digest, sidecar = %self.config.digest_file.display(), "recorded source digest");

        let rows = source::open_rows(&source_path)?;
        let graph = self.convert(rows).await?;
        let (nodes_written, edges_written) = self.write(&graph)?;

        Ok(RunReport {
            source: source_path,
            digest,
            build: graph.build,
            counts: graph.counts,
            unresolved: graph.unresolved,
            nodes_written,
            edges_written,
            nodes_path: self.config.nodes_path(),
            edges_path: self.config.edges_path(),
        })
    }
}
