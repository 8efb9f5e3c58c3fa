//! Graph Builder: spreadsheet rows into deduplicated node and edge maps

use super::column;
use super::edge::{EdgeId, RawEdge};
use super::error::GraphResult;
use super::node::{RawNode, SourceCategory};
use crate::source::Row;
use indexmap::IndexMap;
use tracing::{info, warn};

/// Counters reported after a build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Rows consumed
    pub rows: usize,
    /// Edge ids that were already present when a row produced them
    pub duplicate_edges: usize,
    /// Node overwrites that changed the node's category
    pub category_conflicts: usize,
}

/// Output of the Graph Builder
///
/// Both maps keep first-insertion order; an overwrite replaces the value
/// in place.
#[derive(Debug, Clone, Default)]
pub struct RawGraph {
    pub nodes: IndexMap<String, RawNode>,
    pub edges: IndexMap<EdgeId, RawEdge>,
    pub stats: BuildStats,
}

/// Incrementally folds rows into a [`RawGraph`]
#[derive(Debug)]
pub struct GraphBuilder {
    provided_by: String,
    graph: RawGraph,
}

impl GraphBuilder {
    pub fn new(provided_by: impl Into<String>) -> Self {
        Self {
            provided_by: provided_by.into(),
            graph: RawGraph::default(),
        }
    }

    /// Add one row: a protocol node, a standard node and an edge in each direction.
    ///
    /// Fails without modifying the graph if a required column is absent.
    pub fn push_row(&mut self, row: &Row) -> GraphResult<()> {
        let protocol = RawNode::new(
            row.require(column::PROTOCOL_ID)?,
            SourceCategory::Protocol,
            row.require(column::PROTOCOL_NAME)?,
        );
        let standard = RawNode::new(
            row.require(column::STANDARD_ID)?,
            SourceCategory::from_label(row.require(column::STANDARD_TYPE)?),
            row.require(column::STANDARD_DESCRIPTION)?,
        );

        let forward =
            RawEdge::association(&protocol.source_key, &standard.source_key, &self.provided_by);
        let backward = forward.reversed();

        let edges = &mut self.graph.edges;
        let duplicates = [&forward.id, &backward.id]
            .into_iter()
            .filter(|id| edges.contains_key(*id))
            .count();
        self.graph.stats.duplicate_edges += duplicates;
        edges.insert(forward.id.clone(), forward);
        edges.insert(backward.id.clone(), backward);

        self.insert_node(protocol);
        self.insert_node(standard);
        self.graph.stats.rows += 1;
        Ok(())
    }

    fn insert_node(&mut self, node: RawNode) {
        if let Some(previous) = self.graph.nodes.insert(node.source_key.clone(), node) {
            let current = &self.graph.nodes[&previous.source_key];
            if current.category != previous.category {
                warn!(
                    id = %previous.source_key,
                    from = %previous.category,
                    to = %current.category,
                    "node category changed by a later row"
                );
                self.graph.stats.category_conflicts += 1;
            }
        }
    }

    /// Consume the builder and return the collected graph
    pub fn finish(self) -> RawGraph {
        let stats = &self.graph.stats;
        info!(rows = stats.rows, "processed rows");
        info!(duplicates = stats.duplicate_edges, "duplicate edges found");
        self.graph
    }
}

/// Build a [`RawGraph`] from a sequence of rows, stopping at the first bad row
pub fn build_graph<I>(rows: I, provided_by: &str) -> GraphResult<RawGraph>
where
    I: IntoIterator<Item = Row>,
{
    let mut builder = GraphBuilder::new(provided_by);
    for row in rows {
        builder.push_row(&row)?;
    }
    Ok(builder.finish())
}
