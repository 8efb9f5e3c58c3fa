//! Node representations before and after normalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity category taken from the source row.
///
/// The protocol side of every row is always [`SourceCategory::Protocol`];
/// the standard side is parsed from the `Standard Type` cell by exact match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceCategory {
    /// A PhenX protocol
    Protocol,
    /// caDSR Common Data Element
    CommonDataElement,
    /// Human Phenotype Ontology term
    Phenotype,
    /// LOINC observation code
    Loinc,
    /// Any label the converter has no rule for
    Unknown(String),
}

impl SourceCategory {
    pub const PROTOCOL_LABEL: &'static str = "protocol";
    pub const CDE_LABEL: &'static str = "caDSR Common Data Elements (CDE)";
    pub const PHENOTYPE_LABEL: &'static str = "Human Phenotype Ontology";
    pub const LOINC_LABEL: &'static str = "Logical Observation Identifiers Names and Codes (LOINC)";

    /// Parse a `Standard Type` cell. Matching is exact.
    pub fn from_label(label: &str) -> Self {
        match label {
            Self::PROTOCOL_LABEL => Self::Protocol,
            Self::CDE_LABEL => Self::CommonDataElement,
            Self::PHENOTYPE_LABEL => Self::Phenotype,
            Self::LOINC_LABEL => Self::Loinc,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The label as it appears in the spreadsheet
    pub fn label(&self) -> &str {
        match self {
            Self::Protocol => Self::PROTOCOL_LABEL,
            Self::CommonDataElement => Self::CDE_LABEL,
            Self::Phenotype => Self::PHENOTYPE_LABEL,
            Self::Loinc => Self::LOINC_LABEL,
            Self::Unknown(label) => label,
        }
    }
}

impl From<String> for SourceCategory {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<SourceCategory> for String {
    fn from(category: SourceCategory) -> Self {
        category.label().to_string()
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A node as extracted from one spreadsheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    /// Natural id from the spreadsheet; the join key for edges
    #[serde(rename = "id")]
    pub source_key: String,
    /// Category discriminator, fixed once read from the row
    #[serde(rename = "type")]
    pub category: SourceCategory,
    /// Display name
    pub name: String,
}

impl RawNode {
    pub fn new(
        source_key: impl Into<String>,
        category: SourceCategory,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source_key: source_key.into(),
            category,
            name: name.into(),
        }
    }
}

/// Biolink category value: the resolver reports a list, the fallback a single string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Single(String),
    Many(Vec<String>),
}

impl Category {
    pub fn single(category: impl Into<String>) -> Self {
        Self::Single(category.into())
    }

    pub fn many<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(categories.into_iter().map(Into::into).collect())
    }

    /// True if `category` is (one of) the values
    pub fn contains(&self, category: &str) -> bool {
        match self {
            Self::Single(c) => c == category,
            Self::Many(cs) => cs.iter().any(|c| c == category),
        }
    }
}

/// A node in KGX form, ready to be written to `nodes.jsonl`
///
/// `source_key` keeps the pre-normalization id so edges can still be joined
/// after `id` has been prefixed or replaced by a canonical identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedNode {
    #[serde(skip)]
    pub source_key: String,
    pub id: String,
    pub category: Category,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resource_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub synonyms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub equivalent_identifiers: Option<Vec<String>>,
}

impl NormalizedNode {
    /// Create a node with only the required fields set
    pub fn new(
        source_key: impl Into<String>,
        id: impl Into<String>,
        category: Category,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source_key: source_key.into(),
            id: id.into(),
            category,
            name: name.into(),
            resource_url: None,
            description: None,
            synonyms: None,
            equivalent_identifiers: None,
        }
    }

    pub fn with_resource_url(mut self, url: impl Into<String>) -> Self {
        self.resource_url = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.synonyms = Some(synonyms);
        self
    }

    pub fn with_equivalent_identifiers(mut self, identifiers: Vec<String>) -> Self {
        self.equivalent_identifiers = Some(identifiers);
        self
    }
}
