//! Page record types produced by the crawler

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A heading element found on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level, 1 through 6
    pub level: u8,

    /// Trimmed heading text
    pub text: String,
}

/// Structured content harvested from one successfully fetched page
///
/// Records are only created for pages that fetched and parsed; the word count
/// is always derived from `content` by [`count_words`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    pub headings: Vec<Heading>,
    pub content: String,
    /// Same-host absolute URLs linked from the page, first-seen order
    pub internal_links: Vec<String>,
    word_count: usize,
    pub crawled_at: DateTime<Utc>,
}

impl PageRecord {
    /// Creates a record stamped with the current time
    pub fn new(
        url: String,
        title: String,
        description: String,
        headings: Vec<Heading>,
        content: String,
        internal_links: Vec<String>,
    ) -> Self {
        let word_count = count_words(&content);
        Self {
            url,
            title,
            description,
            headings,
            content,
            internal_links,
            word_count,
            crawled_at: Utc::now(),
        }
    }

    /// Number of whitespace-separated words in `content`
    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

/// Counts non-empty whitespace-delimited tokens
pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Progress event emitted once per completed page attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlProgress {
    /// Completed attempts so far, starting at 1
    pub current: usize,

    /// Size of the selection being crawled
    pub total: usize,

    /// The URL that just finished, whether it succeeded or not
    pub url: String,
}
