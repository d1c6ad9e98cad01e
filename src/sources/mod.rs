use async_trait::async_trait;
use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{Offer, Progress};

mod corpus;
mod dedupe;
mod sample;

pub use corpus::CorpusSource;
pub use dedupe::dedupe_by_url;
pub use sample::SampleSource;

/// A pluggable source of offers for a query. A source either resolves with
/// a complete list or fails as a unit; it must never leak a partial result.
#[async_trait]
pub trait OfferSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch(&self, query: &str) -> Result<Vec<Offer>>;
}

/// Receives one event per source that contributed results. The runner has
/// no knowledge of who is listening; the CLI plugs in a logging observer,
/// tests plug in a recorder.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: Progress);
}

/// Observer that reports fan-out progress through the log.
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&self, progress: Progress) {
        info!("Comparing sources ({}/{})", progress.done, progress.total);
    }
}

/// Fans a query out to every registered source concurrently and merges
/// whatever comes back.
pub struct SourceRunner {
    sources: Vec<Box<dyn OfferSource>>,
    observer: Option<Arc<dyn ProgressObserver>>,
}

impl SourceRunner {
    pub fn new(sources: Vec<Box<dyn OfferSource>>) -> Self {
        Self {
            sources,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run every source against the query and return the deduplicated
    /// union of their results.
    ///
    /// Sources are independent: a slow or failing source never blocks or
    /// cancels the others. Results land in the accumulator in completion
    /// order, which depends on source latency and carries no guarantee.
    /// A failed source contributes nothing and does not advance the
    /// progress counter. This never errors; if every source fails the
    /// result is simply empty.
    pub async fn run(&self, query: &str) -> Vec<Offer> {
        let total = self.sources.len();
        let mut pending: FuturesUnordered<_> = self
            .sources
            .iter()
            .map(|source| async move { (source.name().to_string(), source.fetch(query).await) })
            .collect();

        let mut merged: Vec<Offer> = Vec::new();
        let mut done = 0;

        while let Some((name, result)) = pending.next().await {
            match result {
                Ok(offers) => {
                    info!("Source {} returned {} offers", name, offers.len());
                    merged.extend(offers);
                    done += 1;
                    if let Some(observer) = &self.observer {
                        observer.on_progress(Progress { done, total });
                    }
                }
                Err(e) => {
                    warn!("Source {} failed: {:#}", name, e);
                }
            }
        }

        dedupe_by_url(merged)
    }
}
