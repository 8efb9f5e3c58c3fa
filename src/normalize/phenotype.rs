//! Phenotype Resolver: batched lookups against the identity-resolution service

use super::traits::{NodeNormalizer, NormalizedRecord};
use super::NormalizeResult;
use crate::graph::{Category, NormalizedNode, RawNode};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Curies per service request
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Category assigned when the service has nothing for a curie
pub const FALLBACK_CATEGORY: &str = "biolink:PhenotypicFeature";

/// Result of resolving a set of phenotype nodes
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Keyed by source key, in input order
    pub nodes: IndexMap<String, NormalizedNode>,
    /// Curies the service could not resolve
    pub unresolved: Vec<String>,
}

/// Resolves phenotype curies in fixed-size batches, one request at a time
#[derive(Clone)]
pub struct PhenotypeResolver {
    normalizer: Arc<dyn NodeNormalizer>,
    batch_size: usize,
}

impl PhenotypeResolver {
    pub fn new(normalizer: Arc<dyn NodeNormalizer>) -> Self {
        Self {
            normalizer,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the batch size; zero is treated as one
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Resolve every node, in map order, chunked into consecutive batches.
    ///
    /// Any service error aborts the resolution.
    pub async fn resolve(&self, nodes: &IndexMap<String, RawNode>) -> NormalizeResult<Resolution> {
        let keys: Vec<String> = nodes.keys().cloned().collect();
        let mut resolution = Resolution::default();

        for (index, curies) in keys.chunks(self.batch_size).enumerate() {
            debug!(batch = index, size = curies.len(), "resolving phenotype batch");
            let response = self.normalizer.normalize_batch(curies).await?;

            for curie in curies {
                let raw = &nodes[curie];
                let record = response.get(curie).and_then(Option::as_ref);
                let node = match record.and_then(|r| resolved_node(raw, r)) {
                    Some(node) => node,
                    None => {
                        warn!(curie = %curie, "did not normalize, setting it as {}", FALLBACK_CATEGORY);
                        resolution.unresolved.push(curie.clone());
                        fallback_node(raw)
                    }
                };
                resolution.nodes.insert(curie.clone(), node);
            }
        }
        Ok(resolution)
    }
}

/// Node built from a service record; `None` if the record has no primary id.
/// The canonical id is used as-is, without a prefix.
fn resolved_node(raw: &RawNode, record: &NormalizedRecord) -> Option<NormalizedNode> {
    let primary = record.id.as_ref()?;
    let name = primary.label.clone().unwrap_or_else(|| raw.name.clone());
    Some(
        NormalizedNode::new(
            &raw.source_key,
            &primary.identifier,
            Category::Many(record.types.clone()),
            name,
        )
        .with_synonyms(record.synonyms())
        .with_equivalent_identifiers(record.equivalent_ids()),
    )
}

fn fallback_node(raw: &RawNode) -> NormalizedNode {
    NormalizedNode::new(
        &raw.source_key,
        &raw.source_key,
        Category::single(FALLBACK_CATEGORY),
        &raw.name,
    )
    .with_equivalent_identifiers(vec![raw.source_key.clone()])
}
