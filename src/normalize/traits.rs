//! NodeNormalizer trait and the identity-resolution response shape

use super::NormalizeResult;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// An identifier with an optional human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabeledIdentifier {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LabeledIdentifier {
    pub fn new(identifier: impl Into<String>, label: Option<&str>) -> Self {
        Self {
            identifier: identifier.into(),
            label: label.map(str::to_string),
        }
    }
}

/// The service's answer for one curie
///
/// Every field defaults so an empty object still parses, and list fields
/// sent as `null` read as empty. A record without a primary `id` is treated
/// as unresolved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRecord {
    #[serde(default)]
    pub id: Option<LabeledIdentifier>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equivalent_identifiers: Vec<LabeledIdentifier>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl NormalizedRecord {
    /// Non-empty labels of the equivalent identifiers, in response order
    pub fn synonyms(&self) -> Vec<String> {
        self.equivalent_identifiers
            .iter()
            .filter_map(|e| e.label.as_deref())
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn equivalent_ids(&self) -> Vec<String> {
        self.equivalent_identifiers
            .iter()
            .map(|e| e.identifier.clone())
            .collect()
    }
}

/// Response for one batch: requested curie to record, `None` when unknown
pub type NormalizedBatch = HashMap<String, Option<NormalizedRecord>>;

/// An identity-resolution backend.
///
/// Implementations receive at most one batch at a time, in order.
#[async_trait]
pub trait NodeNormalizer: Send + Sync {
    /// Resolve a batch of curies.
    ///
    /// Curies missing from the returned map are treated as unresolved.
    async fn normalize_batch(&self, curies: &[String]) -> NormalizeResult<NormalizedBatch>;
}
