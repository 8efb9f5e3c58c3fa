//! Shared helpers for the integration tests

#![allow(dead_code)]

pub mod http_stub;
pub mod mock_normalizer;

pub use http_stub::HttpStub;
pub use mock_normalizer::{RecordingNormalizer, Unknown};

use phenx_kgx::{column, Row, SourceCategory};

pub const PROTOCOL: &str = SourceCategory::PROTOCOL_LABEL;
pub const CDE: &str = SourceCategory::CDE_LABEL;
pub const HPO: &str = SourceCategory::PHENOTYPE_LABEL;
pub const LOINC: &str = SourceCategory::LOINC_LABEL;

/// A complete cross-reference row
pub fn xref_row(
    line: usize,
    protocol_id: &str,
    protocol_name: &str,
    standard_id: &str,
    standard_type: &str,
    description: &str,
) -> Row {
    Row::from_pairs(
        line,
        [
            (column::PROTOCOL_ID, protocol_id),
            (column::PROTOCOL_NAME, protocol_name),
            (column::STANDARD_ID, standard_id),
            (column::STANDARD_TYPE, standard_type),
            (column::STANDARD_DESCRIPTION, description),
        ],
    )
}

/// A small sheet touching every category, with one repeated pair
pub fn sample_rows() -> Vec<Row> {
    vec![
        xref_row(2, "10101", "Height", "62293-6", LOINC, "Body height"),
        xref_row(3, "10101", "Height", "2178", CDE, "Person height value"),
        xref_row(4, "20202", "Seizure history", "HP:0001250", HPO, "Seizure"),
        xref_row(5, "20202", "Seizure history", "HP:9999999", HPO, "Made-up phenotype"),
        xref_row(6, "10101", "Height", "62293-6", LOINC, "Body height"),
    ]
}
