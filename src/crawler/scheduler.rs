//! Scheduler for running page fetches under a concurrency budget
//!
//! This module handles:
//! - Selecting the first `page_budget` URLs of the input, in input order
//! - Keeping at most `concurrency` fetches in flight at once
//! - Reporting progress once per completed attempt
//! - Dropping failed pages without aborting the batch
//!
//! Fetches are interleaved on the calling task; nothing is spawned. Results
//! come back in completion order, not input order.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetch;
use crate::crawler::page::{CrawlProgress, PageRecord};
use futures::stream::{FuturesUnordered, StreamExt};

/// Scheduler drives a [`PageFetch`] over a selection of URLs
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Maximum number of fetches outstanding at once
    concurrency: usize,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// A concurrency of zero is treated as one.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.concurrency)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Crawls the first `page_budget` URLs without progress reporting
    pub async fn crawl<F: PageFetch>(
        &self,
        fetcher: &F,
        urls: &[String],
        page_budget: usize,
    ) -> Vec<PageRecord> {
        self.crawl_with_progress(fetcher, urls, page_budget, |_| {})
            .await
    }

    /// Crawls the first `page_budget` URLs, calling `on_progress` after each attempt
    ///
    /// `on_progress` fires exactly once per URL in the selection, success or
    /// failure, with `current` counting up from 1 to the selection size. Pages
    /// that fail to fetch are logged and left out of the result; they are not
    /// retried. The returned records are in completion order.
    pub async fn crawl_with_progress<F, P>(
        &self,
        fetcher: &F,
        urls: &[String],
        page_budget: usize,
        mut on_progress: P,
    ) -> Vec<PageRecord>
    where
        F: PageFetch,
        P: FnMut(&CrawlProgress),
    {
        let selection = &urls[..page_budget.min(urls.len())];
        let total = selection.len();
        let mut pages = Vec::with_capacity(total);

        if total == 0 {
            return pages;
        }

        tracing::debug!(
            "Crawling {} URLs with {} concurrent fetches",
            total,
            self.concurrency
        );

        let mut pending = selection.iter();
        let mut in_flight = FuturesUnordered::new();
        let mut completed = 0;

        loop {
            // Fill free slots before waiting on the next completion
            while in_flight.len() < self.concurrency {
                let Some(url) = pending.next() else {
                    break;
                };
                in_flight.push(async move { (url, fetcher.fetch(url).await) });
            }

            let Some((url, outcome)) = in_flight.next().await else {
                break;
            };
            completed += 1;

            match outcome {
                Ok(page) => pages.push(page),
                Err(e) => tracing::warn!("Skipping {}: {}", url, e),
            }

            on_progress(&CrawlProgress {
                current: completed,
                total,
                url: url.clone(),
            });
        }

        tracing::debug!("Crawled {} of {} pages successfully", pages.len(), total);
        pages
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}
