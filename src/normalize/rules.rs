//! Offline normalization for protocols, CDEs and LOINC codes

use crate::graph::{Category, NormalizedNode, RawNode};

/// Category given to every prefix-normalized node
pub const PUBLICATION_CATEGORY: &str = "biolink:Publication";

/// Rewrites a natural id into a prefixed curie with a browsable URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRule {
    /// Curie prefix, including the colon
    pub prefix: &'static str,
    /// Resource URL with `{id}` standing for the unprefixed id
    pub url_template: &'static str,
    pub category: &'static str,
}

pub const PROTOCOL_RULE: PrefixRule = PrefixRule {
    prefix: "phenx:",
    url_template: "https://www.phenxtoolkit.org/search/results?searchTerm={id}&searchtype=smartsearch",
    category: PUBLICATION_CATEGORY,
};

pub const CDE_RULE: PrefixRule = PrefixRule {
    prefix: "caDSRCDE:",
    url_template: "https://cdebrowser.nci.nih.gov/cdebrowserClient/cdeBrowser.html#/search?publicId={id}&version=1.0",
    category: PUBLICATION_CATEGORY,
};

pub const LOINC_RULE: PrefixRule = PrefixRule {
    prefix: "LOINC:",
    url_template: "https://loinc.org/{id}/",
    category: PUBLICATION_CATEGORY,
};

impl PrefixRule {
    pub fn resource_url(&self, id: &str) -> String {
        self.url_template.replace("{id}", id)
    }

    /// Name and description both come from the source row's name
    pub fn apply(&self, node: &RawNode) -> NormalizedNode {
        NormalizedNode::new(
            &node.source_key,
            format!("{}{}", self.prefix, node.source_key),
            Category::many([self.category]),
            &node.name,
        )
        .with_resource_url(self.resource_url(&node.source_key))
        .with_description(&node.name)
    }
}
