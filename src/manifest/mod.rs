//! Sitemap discovery module
//!
//! This module finds the URLs a site declares in its sitemap:
//! - Parsing sitemap and sitemap index documents
//! - Trying the usual sitemap paths, then robots.txt `Sitemap:` directives
//! - Expanding nested indices with a visited set and depth bound
//! - Keeping only same-site entries, deduplicated by location

mod parser;
mod resolver;

pub use parser::{parse_manifest, ManifestDocument};
pub use resolver::ManifestResolver;

use serde::{Deserialize, Serialize};

/// One page location declared in a sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Absolute page URL
    pub loc: String,

    /// Last-modification hint, as written in the sitemap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
}
