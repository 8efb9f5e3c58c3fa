//! Recording NodeNormalizer for tests
//!
//! Answers from a fixed table of known curies and remembers every batch it
//! was asked for, so tests can assert on batching without a network.

use async_trait::async_trait;
use phenx_kgx::normalize::{LabeledIdentifier, NormalizeResult};
use phenx_kgx::{NodeNormalizer, NormalizeError, NormalizedBatch, NormalizedRecord};
use std::collections::HashMap;
use std::sync::Mutex;

/// How curies outside the table appear in the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {
    /// Left out of the response map
    Omitted,
    /// Present with a `null` value
    Null,
}

pub struct RecordingNormalizer {
    known: HashMap<String, NormalizedRecord>,
    unknown: Unknown,
    fail_on_call: Option<usize>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl Default for RecordingNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingNormalizer {
    pub fn new() -> Self {
        Self {
            known: HashMap::new(),
            unknown: Unknown::Omitted,
            fail_on_call: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Resolve `curie` to `canonical` with the given label and equivalents
    pub fn with_record(
        mut self,
        curie: &str,
        canonical: &str,
        label: Option<&str>,
        equivalents: &[(&str, Option<&str>)],
    ) -> Self {
        let record = NormalizedRecord {
            id: Some(LabeledIdentifier::new(canonical, label)),
            equivalent_identifiers: equivalents
                .iter()
                .map(|(id, label)| LabeledIdentifier::new(*id, *label))
                .collect(),
            types: vec![
                "biolink:PhenotypicFeature".to_string(),
                "biolink:DiseaseOrPhenotypicFeature".to_string(),
            ],
        };
        self.known.insert(curie.to_string(), record);
        self
    }

    pub fn with_unknown(mut self, unknown: Unknown) -> Self {
        self.unknown = unknown;
        self
    }

    /// Fail the `n`th call (0-based) with a 503 status
    pub fn failing_on_call(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    /// Every batch received, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls().iter().map(Vec::len).collect()
    }
}

#[async_trait]
impl NodeNormalizer for RecordingNormalizer {
    async fn normalize_batch(&self, curies: &[String]) -> NormalizeResult<NormalizedBatch> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(curies.to_vec());
            calls.len() - 1
        };
        if self.fail_on_call == Some(call) {
            return Err(NormalizeError::Status {
                status: 503,
                attempts: 1,
            });
        }

        let mut batch = NormalizedBatch::new();
        for curie in curies {
            match self.known.get(curie) {
                Some(record) => {
                    batch.insert(curie.clone(), Some(record.clone()));
                }
                None if self.unknown == Unknown::Null => {
                    batch.insert(curie.clone(), None);
                }
                None => {}
            }
        }
        Ok(batch)
    }
}
