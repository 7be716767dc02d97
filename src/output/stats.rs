//! Harvest statistics
//!
//! Summarizes a finished harvest for display.

use crate::crawler::Harvest;

/// Harvest statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarvestSummary {
    /// Site the harvest ran against
    pub site_url: String,

    /// Number of sitemap entries resolved
    pub manifest_entries: usize,

    /// Number of page records produced
    pub pages_crawled: usize,

    /// Sum of word counts across pages
    pub total_words: usize,

    /// Mean word count per page (0 when no pages)
    pub average_words: f64,

    /// Pages with an empty title
    pub missing_titles: usize,

    /// Pages with an empty meta description
    pub missing_descriptions: usize,

    /// Internal links across all pages, duplicates across pages included
    pub internal_links: usize,
}

impl HarvestSummary {
    pub fn from_harvest(harvest: &Harvest) -> Self {
        let pages = &harvest.pages;
        let total_words: usize = pages.iter().map(|p| p.word_count()).sum();
        let average_words = if pages.is_empty() {
            0.0
        } else {
            total_words as f64 / pages.len() as f64
        };

        Self {
            site_url: harvest.site_url.clone(),
            manifest_entries: harvest.manifest.len(),
            pages_crawled: pages.len(),
            total_words,
            average_words,
            missing_titles: pages.iter().filter(|p| p.title.is_empty()).count(),
            missing_descriptions: pages.iter().filter(|p| p.description.is_empty()).count(),
            internal_links: pages.iter().map(|p| p.internal_links.len()).sum(),
        }
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &HarvestSummary) {
    println!("=== Harvest Summary ===\n");
    println!("Site: {}", summary.site_url);
    println!("Sitemap entries: {}", summary.manifest_entries);
    println!("Pages crawled: {}", summary.pages_crawled);
    println!("Total words: {}", summary.total_words);
    println!("Average words per page: {:.1}", summary.average_words);
    println!("Internal links: {}", summary.internal_links);

    if summary.missing_titles > 0 || summary.missing_descriptions > 0 {
        println!("\nMissing metadata:");
        println!("  Without title: {}", summary.missing_titles);
        println!("  Without description: {}", summary.missing_descriptions);
    }
}
