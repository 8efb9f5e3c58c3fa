//! Edge representation with content-addressed ids

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The only predicate the cross-reference sheet expresses
pub const ASSOCIATION_PREDICATE: &str = "biolink:association";

/// Default `provided_by` stamped on every edge
pub const DEFAULT_PROVIDED_BY: &str = "helx_phenx_kgx_convertor";

/// Content-addressed edge identifier (lowercase hex SHA-256)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Hash `"{subject}-{predicate}-{object}"`
    pub fn derive(subject: &str, predicate: &str, object: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(format!("{}-{}-{}", subject, predicate, object).as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directed edge between two nodes
///
/// Before rewriting, `subject` and `object` hold source keys; afterwards
/// they hold the normalized node ids. The `id` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEdge {
    pub id: EdgeId,
    pub subject: String,
    pub object: String,
    pub predicate: String,
    pub provided_by: String,
}

impl RawEdge {
    /// Create a `biolink:association` edge with its id derived from the endpoints
    pub fn association(
        subject: impl Into<String>,
        object: impl Into<String>,
        provided_by: impl Into<String>,
    ) -> Self {
        let subject = subject.into();
        let object = object.into();
        Self {
            id: EdgeId::derive(&subject, ASSOCIATION_PREDICATE, &object),
            subject,
            object,
            predicate: ASSOCIATION_PREDICATE.to_string(),
            provided_by: provided_by.into(),
        }
    }

    /// The same relationship pointing the other way
    pub fn reversed(&self) -> Self {
        Self {
            id: EdgeId::derive(&self.object, &self.predicate, &self.subject),
            subject: self.object.clone(),
            object: self.subject.clone(),
            predicate: self.predicate.clone(),
            provided_by: self.provided_by.clone(),
        }
    }
}
