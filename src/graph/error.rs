//! Errors raised while building or rewriting the graph

use super::edge::EdgeId;
use thiserror::Error;

/// Errors that can occur in graph construction
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("row {line}: missing value for column '{column}'")]
    MissingColumn { line: usize, column: String },

    #[error("edge {edge} references node '{node}' which has no normalized entry")]
    MissingNode { edge: EdgeId, node: String },
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
