//! Node normalization
//!
//! Every raw node is dispatched on its [`SourceCategory`]: protocols, CDEs
//! and LOINC codes are rewritten offline by a [`PrefixRule`]; phenotypes go
//! through the [`PhenotypeResolver`]; unknown categories are handled per
//! [`UnknownCategoryPolicy`].

mod client;
mod phenotype;
mod rules;
mod traits;

pub use client::{NodeNormClient, RetryPolicy, DEFAULT_NORMALIZER_URL};
pub use phenotype::{PhenotypeResolver, Resolution, DEFAULT_BATCH_SIZE, FALLBACK_CATEGORY};
pub use rules::{PrefixRule, CDE_RULE, LOINC_RULE, PROTOCOL_RULE, PUBLICATION_CATEGORY};
pub use traits::{LabeledIdentifier, NodeNormalizer, NormalizedBatch, NormalizedRecord};

use crate::graph::{Category, NormalizedNode, RawNode, SourceCategory};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// Category for nodes passed through without a rule
pub const NAMED_THING_CATEGORY: &str = "biolink:NamedThing";

/// Errors that can occur during normalization
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("normalizer returned status {status} after {attempts} attempt(s)")]
    Status { status: u16, attempts: u32 },

    #[error("node '{id}' has unsupported category '{category}'")]
    UnknownCategory { id: String, category: String },
}

/// Result type for normalization operations
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// What to do with nodes whose category has no normalizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownCategoryPolicy {
    /// Fail the run before any service request is made
    #[default]
    Reject,
    /// Keep the node with its source id and a generic category
    PassThrough,
    /// Leave the node out; edges touching it fail the rewrite
    Drop,
}

impl FromStr for UnknownCategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "pass-through" => Ok(Self::PassThrough),
            "drop" => Ok(Self::Drop),
            other => Err(format!(
                "unknown policy '{}' (expected reject, pass-through or drop)",
                other
            )),
        }
    }
}

/// Node counts per source category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts {
    pub protocols: usize,
    pub cdes: usize,
    pub phenotypes: usize,
    pub loincs: usize,
    pub unknown: usize,
}

/// Output of [`normalize_nodes`]
#[derive(Debug, Clone, Default)]
pub struct NormalizationOutcome {
    /// Keyed by source key: protocols, CDEs, phenotypes, LOINC, then pass-through
    pub nodes: IndexMap<String, NormalizedNode>,
    pub counts: BucketCounts,
    /// Phenotype curies the service did not resolve
    pub unresolved: Vec<String>,
    /// Source keys dropped under [`UnknownCategoryPolicy::Drop`]
    pub dropped: Vec<String>,
}

#[derive(Default)]
struct Buckets {
    protocols: Vec<RawNode>,
    cdes: Vec<RawNode>,
    phenotypes: IndexMap<String, RawNode>,
    loincs: Vec<RawNode>,
    unknown: Vec<RawNode>,
}

impl Buckets {
    fn partition(nodes: &IndexMap<String, RawNode>) -> Self {
        let mut buckets = Self::default();
        for (key, node) in nodes {
            match &node.category {
                SourceCategory::Protocol => buckets.protocols.push(node.clone()),
                SourceCategory::CommonDataElement => buckets.cdes.push(node.clone()),
                SourceCategory::Phenotype => {
                    buckets.phenotypes.insert(key.clone(), node.clone());
                }
                SourceCategory::Loinc => buckets.loincs.push(node.clone()),
                SourceCategory::Unknown(_) => buckets.unknown.push(node.clone()),
            }
        }
        buckets
    }

    fn counts(&self) -> BucketCounts {
        BucketCounts {
            protocols: self.protocols.len(),
            cdes: self.cdes.len(),
            phenotypes: self.phenotypes.len(),
            loincs: self.loincs.len(),
            unknown: self.unknown.len(),
        }
    }
}

fn apply_rule(
    rule: PrefixRule,
    nodes: &[RawNode],
) -> impl Iterator<Item = (String, NormalizedNode)> + '_ {
    nodes
        .iter()
        .map(move |node| (node.source_key.clone(), rule.apply(node)))
}

fn pass_through(node: &RawNode) -> NormalizedNode {
    NormalizedNode::new(
        &node.source_key,
        &node.source_key,
        Category::many([NAMED_THING_CATEGORY]),
        &node.name,
    )
    .with_description(&node.name)
}

/// Normalize every node, returning a single map keyed by source key.
///
/// Under [`UnknownCategoryPolicy::Reject`] an unknown category fails the
/// call before the resolver is contacted.
pub async fn normalize_nodes(
    nodes: &IndexMap<String, RawNode>,
    resolver: &PhenotypeResolver,
    policy: UnknownCategoryPolicy,
) -> NormalizeResult<NormalizationOutcome> {
    let buckets = Buckets::partition(nodes);
    let counts = buckets.counts();
    info!(
        protocols = counts.protocols,
        cdes = counts.cdes,
        phenotypes = counts.phenotypes,
        loincs = counts.loincs,
        unknown = counts.unknown,
        "partitioned nodes by category"
    );

    if policy == UnknownCategoryPolicy::Reject {
        if let Some(node) = buckets.unknown.first() {
            return Err(NormalizeError::UnknownCategory {
                id: node.source_key.clone(),
                category: node.category.label().to_string(),
            });
        }
    }

    let resolution = resolver.resolve(&buckets.phenotypes).await?;
    if !resolution.unresolved.is_empty() {
        warn!(count = resolution.unresolved.len(), "phenotypes left unresolved");
    }

    let mut outcome = NormalizationOutcome {
        counts,
        unresolved: resolution.unresolved,
        ..Default::default()
    };
    outcome.nodes.extend(apply_rule(PROTOCOL_RULE, &buckets.protocols));
    outcome.nodes.extend(apply_rule(CDE_RULE, &buckets.cdes));
    outcome.nodes.extend(resolution.nodes);
    outcome.nodes.extend(apply_rule(LOINC_RULE, &buckets.loincs));

    match policy {
        UnknownCategoryPolicy::PassThrough => {
            outcome.nodes.extend(
                buckets
                    .unknown
                    .iter()
                    .map(|node| (node.source_key.clone(), pass_through(node))),
            );
        }
        UnknownCategoryPolicy::Drop => {
            for node in &buckets.unknown {
                warn!(id = %node.source_key, category = %node.category, "dropping node with unsupported category");
            }
            outcome.dropped = buckets.unknown.into_iter().map(|n| n.source_key).collect();
        }
        UnknownCategoryPolicy::Reject => {}
    }

    Ok(outcome)
}
