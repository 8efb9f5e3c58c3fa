//! Core graph data structures

mod builder;
mod edge;
mod error;
mod node;
mod rewrite;


pub use builder::{build_graph, BuildStats, GraphBuilder, RawGraph};
pub use edge::{EdgeId, RawEdge, ASSOCIATION_PREDICATE, DEFAULT_PROVIDED_BY};
pub use error::{GraphError, GraphResult};
pub use node::{Category, NormalizedNode, RawNode, SourceCategory};
pub use rewrite::rewrite_edges;

/// Spreadsheet column names the builder reads.
pub mod column {
    pub const PROTOCOL_ID: &str = "Protocol ID";
    pub const PROTOCOL_NAME: &str = "Protocol Name";
    pub const STANDARD_ID: &str = "Standard ID";
    pub const STANDARD_TYPE: &str = "Standard Type";
    pub const STANDARD_DESCRIPTION: &str = "Standard Description";
}
