use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Site-Harvester
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub timeouts: TimeoutConfig,
    pub manifest: ManifestConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawl scheduling configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of page fetches in flight at once
    pub concurrency: usize,

    /// Default page budget when the caller doesn't pass one
    pub max_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            max_pages: 50,
        }
    }
}

/// Per-request timeouts, in milliseconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimeoutConfig {
    /// Timeout for each sitemap document fetch
    pub manifest_timeout_ms: u64,

    /// Timeout for the robots.txt fetch
    pub robots_timeout_ms: u64,

    /// Timeout for each page fetch
    pub page_timeout_ms: u64,
}

impl TimeoutConfig {
    pub fn manifest_timeout(&self) -> Duration {
        Duration::from_millis(self.manifest_timeout_ms)
    }

    pub fn robots_timeout(&self) -> Duration {
        Duration::from_millis(self.robots_timeout_ms)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            manifest_timeout_ms: 15_000,
            robots_timeout_ms: 10_000,
            page_timeout_ms: 15_000,
        }
    }
}

/// Sitemap discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ManifestConfig {
    /// Paths tried in order under the site root; the first one that yields
    /// entries wins
    pub candidate_paths: Vec<String>,

    /// How many levels of nested sitemap indices are expanded
    pub max_index_depth: u32,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            candidate_paths: vec![
                "/sitemap.xml".to_string(),
                "/sitemap_index.xml".to_string(),
                "/sitemap/".to_string(),
            ],
            max_index_depth: 8,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// User agent sent with page requests, e.g. `SiteHarvester/1.0`
    pub fn page_agent(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }

    /// Browser-compatible user agent sent with sitemap requests
    pub fn manifest_agent(&self) -> String {
        format!("Mozilla/5.0 (compatible; {})", self.page_agent())
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SiteHarvester".to_string(),
            crawler_version: "1.0".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving `sitemap.json` and `site-context.json`
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "./harvest".to_string(),
        }
    }
}
