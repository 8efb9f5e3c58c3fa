//! phenx-kgx: PhenX protocol cross-reference to KGX converter
//!
//! Reads the PhenX `Protocol_cross_reference.xlsx` workbook, which maps
//! protocols to standardized data elements, and emits a knowledge graph as
//! two line-delimited JSON files (`nodes.jsonl`, `edges.jsonl`).
//!
//! # Stages
//!
//! - **Graph building**: each row yields a protocol node, a standard node
//!   and a `biolink:association` edge in each direction, deduplicated by
//!   content-addressed ids
//! - **Normalization**: protocols, CDEs and LOINC codes get prefixed curies;
//!   phenotypes are resolved against the node normalization service
//! - **Edge rewriting**: edge endpoints move to the normalized ids
//!
//! # Example
//!
//! ```
//! use phenx_kgx::{build_graph, Row, DEFAULT_PROVIDED_BY};
//!
//! let row = Row::from_pairs(2, [
//!     ("Protocol ID", "P1"),
//!     ("Protocol Name", "Foo"),
//!     ("Standard ID", "62293-6"),
//!     ("Standard Type", "Logical Observation Identifiers Names and Codes (LOINC)"),
//!     ("Standard Description", "Bar"),
//! ]);
//! let graph = build_graph([row], DEFAULT_PROVIDED_BY).unwrap();
//! assert_eq!(graph.nodes.len(), 2);
//! assert_eq!(graph.edges.len(), 2);
//! ```

pub mod config;
mod graph;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod source;

pub use config::{ConfigError, NormalizerConfig, PipelineConfig};
pub use graph::{
    build_graph, column, rewrite_edges, BuildStats, Category, EdgeId, GraphBuilder, GraphError,
    GraphResult, NormalizedNode, RawEdge, RawGraph, RawNode, SourceCategory,
    ASSOCIATION_PREDICATE, DEFAULT_PROVIDED_BY,
};
pub use normalize::{
    normalize_nodes, NodeNormClient, NodeNormalizer, NormalizeError, NormalizedBatch,
    NormalizedRecord, PhenotypeResolver, RetryPolicy, UnknownCategoryPolicy,
};
pub use output::{write_jsonl, OutputError};
pub use pipeline::{KgxGraph, Pipeline, PipelineError, PipelineResult, RunReport};
pub use source::{Row, SourceError, SpreadsheetRows};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
