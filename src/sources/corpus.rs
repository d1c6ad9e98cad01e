use async_trait::async_trait;
use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Offer;
use crate::sources::OfferSource;

/// Why a corpus lookup produced nothing. Only visible in logs: every
/// variant degrades to an empty offer list at the source boundary, so the
/// orchestrator cannot tell a failure from a legitimately empty corpus.
#[derive(Debug, Error)]
enum CorpusError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("payload is not a JSON array")]
    NotAnArray,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Offers from a local JSON corpus served over HTTP: one document per
/// query slug at `{base}/{slug}.json`.
pub struct CorpusSource {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl CorpusSource {
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    async fn lookup(&self, slug: &str) -> Result<Vec<Offer>, CorpusError> {
        let url = format!("{}/{}.json", self.base_url.trim_end_matches('/'), slug);
        debug!("Fetching corpus document {}", url);

        let response = tokio::time::timeout(self.timeout, self.client.get(&url).send())
            .await
            .map_err(|_| CorpusError::Timeout(self.timeout))??;

        if !response.status().is_success() {
            return Err(CorpusError::Status(response.status()));
        }

        let payload: serde_json::Value = tokio::time::timeout(self.timeout, response.json())
            .await
            .map_err(|_| CorpusError::Timeout(self.timeout))??;

        if !payload.is_array() {
            return Err(CorpusError::NotAnArray);
        }
        serde_json::from_value(payload).map_err(|_| CorpusError::NotAnArray)
    }
}

#[async_trait]
impl OfferSource for CorpusSource {
    fn name(&self) -> &str {
        "local-corpus"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Offer>> {
        let slug = slugify(query);
        if slug.is_empty() {
            return Ok(vec![]);
        }

        // Failures degrade to "no offers": the corpus is optional and the
        // other sources must not be held hostage by it.
        match self.lookup(&slug).await {
            Ok(offers) => Ok(offers),
            Err(e) => {
                warn!("Corpus lookup for '{}' yielded nothing: {}", slug, e);
                Ok(vec![])
            }
        }
    }
}

/// Filesystem-safe slug for a query: lowercase, whitespace runs become
/// hyphens, anything outside [a-z0-9-] is dropped, capped at 80 chars.
pub fn slugify(input: &str) -> String {
    let mut slug = String::new();
    let mut in_gap = false;

    for c in input.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            in_gap = true;
            continue;
        }
        if in_gap {
            slug.push('-');
            in_gap = false;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    slug.chars().take(80).collect()
}
