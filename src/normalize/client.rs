//! HTTP client for the node normalization service

use super::traits::{NodeNormalizer, NormalizedBatch};
use super::{NormalizeError, NormalizeResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Public node normalization endpoint
pub const DEFAULT_NORMALIZER_URL: &str =
    "https://nodenormalization-sri.renci.org/get_normalized_nodes";

/// When to re-send a batch after a failed response.
///
/// Retries are immediate; there is no backoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts per batch, including the first
    pub max_attempts: u32,
    /// HTTP statuses worth another attempt
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    /// One retry on 502 Bad Gateway
    fn default() -> Self {
        Self {
            max_attempts: 2,
            retry_statuses: vec![502],
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            retry_statuses: Vec::new(),
        }
    }

    /// Whether attempt number `attempt` (1-based) that ended in `status`
    /// should be followed by another
    pub fn should_retry(&self, status: u16, attempt: u32) -> bool {
        attempt < self.max_attempts && self.retry_statuses.contains(&status)
    }
}

#[derive(Serialize)]
struct CuriesRequest<'a> {
    curies: &'a [String],
}

/// reqwest-backed [`NodeNormalizer`]
#[derive(Debug, Clone)]
pub struct NodeNormClient {
    http: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl NodeNormClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Use a preconfigured reqwest client
    pub fn with_client(url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            url: url.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Build a client with a per-request timeout. `None` waits indefinitely.
    pub fn with_timeout(url: impl Into<String>, timeout: Option<Duration>) -> NormalizeResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(url, builder.build()?))
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl NodeNormalizer for NodeNormClient {
    async fn normalize_batch(&self, curies: &[String]) -> NormalizeResult<NormalizedBatch> {
        let body = CuriesRequest { curies };
        let mut attempt = 1;
        loop {
            let response = self.http.post(&self.url).json(&body).send().await?;
            let status = response.status();
            debug!(%status, attempt, size = curies.len(), "normalizer responded");

            if status.is_success() {
                return Ok(response.json::<NormalizedBatch>().await?);
            }
            if self.retry.should_retry(status.as_u16(), attempt) {
                warn!(%status, attempt, "normalizer request failed, retrying batch");
                attempt += 1;
                continue;
            }
            return Err(NormalizeError::Status {
                status: status.as_u16(),
                attempts: attempt,
            });
        }
    }
}
