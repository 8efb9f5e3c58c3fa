//! Edge Rewriter: point edge endpoints at normalized node ids

use super::edge::{EdgeId, RawEdge};
use super::error::{GraphError, GraphResult};
use super::node::NormalizedNode;
use indexmap::IndexMap;

/// Replace every edge's `subject`/`object` source key with the `id` of the
/// normalized node stored under that key.
///
/// `nodes` must be keyed by source key. There is no best-effort mode: the
/// first endpoint without a normalized node fails the whole rewrite.
pub fn rewrite_edges(
    nodes: &IndexMap<String, NormalizedNode>,
    edges: &IndexMap<EdgeId, RawEdge>,
) -> GraphResult<IndexMap<EdgeId, RawEdge>> {
    let lookup = |edge: &RawEdge, key: &str| -> GraphResult<String> {
        nodes
            .get(key)
            .map(|node| node.id.clone())
            .ok_or_else(|| GraphError::MissingNode {
                edge: edge.id.clone(),
                node: key.to_string(),
            })
    };

    edges
        .iter()
        .map(|(id, edge)| {
            let rewritten = RawEdge {
                subject: lookup(edge, &edge.subject)?,
                object: lookup(edge, &edge.object)?,
                ..edge.clone()
            };
            Ok((id.clone(), rewritten))
        })
        .collect()
}
