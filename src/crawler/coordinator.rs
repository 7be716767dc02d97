//! Harvest coordinator - end-to-end orchestration
//!
//! This module ties the pieces together:
//! - Resolving the site's sitemap entries
//! - Selecting the sitemap locations, or the bare site URL when none exist
//! - Crawling the selection under the page budget
//! - Returning both artifacts for the caller to persist

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, PageFetcher};
use crate::crawler::page::{CrawlProgress, PageRecord};
use crate::crawler::scheduler::Scheduler;
use crate::manifest::{ManifestEntry, ManifestResolver};
use crate::url::site_url_from_property;
use crate::HarvestError;
use serde::Serialize;

/// Result of harvesting one site
#[derive(Debug, Clone, Serialize)]
pub struct Harvest {
    /// Site URL the harvest ran against
    pub site_url: String,

    /// Sitemap entries, possibly empty
    pub manifest: Vec<ManifestEntry>,

    /// Records for the pages that fetched successfully, in completion order
    pub pages: Vec<PageRecord>,
}

/// Main harvester structure
pub struct Harvester {
    config: Config,
    resolver: ManifestResolver,
    fetcher: PageFetcher,
    scheduler: Scheduler,
}

impl Harvester {
    /// Creates a harvester; all components share one HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to harvest
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent)?;

        Ok(Self {
            resolver: ManifestResolver::new(client.clone(), &config),
            fetcher: PageFetcher::new(client, &config.timeouts),
            scheduler: Scheduler::from_config(&config.crawler),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &ManifestResolver {
        &self.resolver
    }

    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Harvests a site using the configured page budget
    pub async fn harvest<P>(&self, site: &str, on_progress: P) -> Harvest
    where
        P: FnMut(&CrawlProgress),
    {
        self.harvest_with_budget(site, self.config.crawler.max_pages, on_progress)
            .await
    }

    /// Harvests a site
    ///
    /// `site` may be a URL or a Search Console `sc-domain:` property. Pages
    /// come from the sitemap in declared order; if the sitemap is empty the
    /// site URL itself is crawled. Never fails: unreachable sites and pages
    /// only shrink the result.
    pub async fn harvest_with_budget<P>(
        &self,
        site: &str,
        max_pages: usize,
        on_progress: P,
    ) -> Harvest
    where
        P: FnMut(&CrawlProgress),
    {
        let site_url = site_url_from_property(site);
        tracing::info!("Harvesting {} (budget {} pages)", site_url, max_pages);

        let manifest = self.resolver.resolve(&site_url).await;
        let urls = select_urls(&manifest, &site_url);
        if manifest.is_empty() {
            tracing::info!("No sitemap entries found, crawling {} only", site_url);
        }

        let pages = self
            .scheduler
            .crawl_with_progress(&self.fetcher, &urls, max_pages, on_progress)
            .await;

        tracing::info!(
            "Harvest of {} complete: {} pages from {} sitemap entries",
            site_url,
            pages.len(),
            manifest.len()
        );

        Harvest {
            site_url,
            manifest,
            pages,
        }
    }
}

/// Sitemap locations in order, or the site URL when the sitemap is empty
pub fn select_urls(manifest: &[ManifestEntry], site_url: &str) -> Vec<String> {
    if manifest.is_empty() {
        vec![site_url.to_string()]
    } else {
        manifest.iter().map(|entry| entry.loc.clone()).collect()
    }
}
