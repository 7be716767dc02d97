//! Site-Harvester: sitemap-driven page inventory and content harvesting
//!
//! This crate discovers the pages a website declares in its sitemap (following
//! nested sitemap indices and robots.txt `Sitemap:` directives), then fetches
//! and parses those pages under a bounded concurrency budget, producing
//! structured page records for downstream analysis.

pub mod config;
pub mod crawler;
pub mod manifest;
pub mod output;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single HTTP fetch
///
/// The page fetcher returns this to its caller; the manifest resolver and the
/// crawl scheduler absorb it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Timeout { url }
            | Self::Http { url, .. }
            | Self::InvalidUrl { url, .. } => url,
        }
    }
}

/// Sitemap document parse errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Unrecognized sitemap root element: <{0}>")]
    UnknownRoot(String),

    #[error("Document has no root element")]
    Empty,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Site-Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlProgress, Harvest, Harvester, Heading, PageFetch, PageFetcher, PageRecord};
pub use manifest::{ManifestEntry, ManifestResolver};
