//! Crawler module for page fetching and processing
//!
//! This module contains the page-harvesting logic, including:
//! - HTTP fetching with bounded timeouts
//! - Structural HTML parsing (title, description, headings, internal links)
//! - Main-content extraction with fallback strategies
//! - Bounded-concurrency scheduling with progress reporting
//! - Overall harvest coordination

mod coordinator;
mod extract;
mod fetcher;
mod page;
mod parser;
mod scheduler;

pub use coordinator::{select_urls, Harvest, Harvester};
pub use extract::{
    collapse_whitespace, BodyTextExtractor, ContentExtractor, ExtractionChain,
    ReadabilityExtractor,
};
pub use fetcher::{build_http_client, fetch_text, FetchOptions, PageFetch, PageFetcher};
pub use page::{count_words, CrawlProgress, Heading, PageRecord};
pub use parser::{parse_document, parse_html, ParsedPage};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete harvest of `site` with the given configuration
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client
/// 2. Resolve the site's sitemap entries
/// 3. Crawl the selected pages, reporting progress
///
/// # Returns
///
/// * `Ok(Harvest)` - The sitemap entries and page records
/// * `Err(HarvestError)` - The HTTP client could not be built
pub async fn harvest<P>(config: Config, site: &str, on_progress: P) -> Result<Harvest, HarvestError>
where
    P: FnMut(&CrawlProgress),
{
    let harvester = Harvester::new(config)?;
    Ok(harvester.harvest(site, on_progress).await)
}
