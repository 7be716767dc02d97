//! Sitemap resolution
//!
//! Resolution never fails: fetch and parse errors on any document are logged
//! at debug level and treated as "nothing found here".

use crate::config::{Config, ManifestConfig};
use crate::crawler::{fetch_text, FetchOptions};
use crate::manifest::parser::{parse_manifest, ManifestDocument};
use crate::manifest::ManifestEntry;
use crate::robots::fetch_robots;
use crate::url::{is_same_site, normalize_site_root, root_domain};
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Accept header sent with sitemap requests
const MANIFEST_ACCEPT: &str = "application/xml, text/xml, */*";

/// Discovers and parses a site's sitemaps into a deduplicated URL list
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    client: Client,
    config: ManifestConfig,
    user_agent: String,
    manifest_timeout: Duration,
    robots_timeout: Duration,
}

/// State accumulated over one resolution
struct Collected {
    /// Root domain of the site, `www.` removed
    site: Option<String>,
    entries: Vec<ManifestEntry>,
    locs: HashSet<String>,
    /// Sitemap documents already fetched (or attempted)
    visited: HashSet<String>,
}

impl Collected {
    fn new(site_root: &str) -> Self {
        Self {
            site: root_domain(site_root),
            entries: Vec::new(),
            locs: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Adds same-site entries not seen before; returns how many were added
    fn add_entries(&mut self, entries: Vec<ManifestEntry>) -> usize {
        let Some(site) = self.site.as_deref() else {
            return 0;
        };

        let before = self.entries.len();
        for entry in entries {
            if !is_same_site(&entry.loc, site) {
                tracing::trace!("Dropping cross-site sitemap entry {}", entry.loc);
                continue;
            }
            if self.locs.insert(entry.loc.clone()) {
                self.entries.push(entry);
            }
        }
        self.entries.len() - before
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ManifestResolver {
    /// Creates a resolver sharing `client`
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            config: config.manifest.clone(),
            user_agent: config.user_agent.manifest_agent(),
            manifest_timeout: config.timeouts.manifest_timeout(),
            robots_timeout: config.timeouts.robots_timeout(),
        }
    }

    /// Resolves the sitemap entries declared for `site_root`
    ///
    /// 1. Each configured candidate path is tried in order, stopping at the
    ///    first that yields entries.
    /// 2. Failing that, every `Sitemap:` location in robots.txt is resolved
    ///    and the results accumulated.
    ///
    /// Entries are unique by `loc` (first occurrence wins) and restricted to
    /// the site's own host, ignoring a leading `www.`. The result may be empty.
    pub async fn resolve(&self, site_root: &str) -> Vec<ManifestEntry> {
        let base = normalize_site_root(site_root);
        let mut collected = Collected::new(&base);

        for path in &self.config.candidate_paths {
            let candidate = format!("{}{}", base, path);
            self.resolve_document(&candidate, &mut collected).await;
            if !collected.is_empty() {
                tracing::debug!("Found sitemap entries at {}", candidate);
                break;
            }
        }

        if collected.is_empty() {
            match fetch_robots(&self.client, &base, self.robots_timeout).await {
                Ok(robots) => {
                    let robots_url = format!("{}/robots.txt", base);
                    for location in robots.sitemaps() {
                        let Some(location) = resolve_child(&robots_url, &location) else {
                            tracing::debug!("Ignoring unusable robots.txt sitemap {}", location);
                            continue;
                        };
                        self.resolve_document(&location, &mut collected).await;
                    }
                }
                Err(e) => tracing::debug!("No robots.txt sitemap fallback: {}", e),
            }
        }

        tracing::info!(
            "Resolved {} sitemap entries for {} ({} documents fetched)",
            collected.entries.len(),
            base,
            collected.visited.len()
        );
        collected.entries
    }

    /// Resolves one sitemap document, expanding indices depth-first
    ///
    /// Children are visited in document order. A location already visited
    /// during this resolution is never fetched again, and indices nested
    /// deeper than `max_index_depth` are not expanded.
    async fn resolve_document(&self, location: &str, collected: &mut Collected) {
        let mut stack = vec![(location.to_string(), 0u32)];

        while let Some((location, depth)) = stack.pop() {
            if depth > self.config.max_index_depth {
                tracing::warn!(
                    "Not following sitemap {}: index nesting exceeds {}",
                    location,
                    self.config.max_index_depth
                );
                continue;
            }

            if !collected.visited.insert(location.clone()) {
                tracing::debug!("Sitemap {} already visited", location);
                continue;
            }

            let body = match self.fetch_document(&location).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Sitemap {} unavailable: {}", location, e);
                    continue;
                }
            };

            match parse_manifest(&body) {
                Ok(ManifestDocument::Index(children)) => {
                    tracing::debug!(
                        "Sitemap index {} lists {} sitemaps",
                        location,
                        children.len()
                    );
                    for child in children.iter().rev() {
                        if let Some(child) = resolve_child(&location, child) {
                            stack.push((child, depth + 1));
                        }
                    }
                }
                Ok(ManifestDocument::UrlSet(entries)) => {
                    let listed = entries.len();
                    let added = collected.add_entries(entries);
                    tracing::debug!(
                        "Sitemap {} listed {} URLs, {} new same-site",
                        location,
                        listed,
                        added
                    );
                }
                Err(e) => tracing::debug!("Ignoring sitemap {}: {}", location, e),
            }
        }
    }

    async fn fetch_document(&self, location: &str) -> Result<String, crate::FetchError> {
        let options = FetchOptions {
            timeout: self.manifest_timeout,
            accept: MANIFEST_ACCEPT,
            user_agent: Some(&self.user_agent),
        };
        fetch_text(&self.client, location, options).await
    }
}

/// Resolves a sitemap location against the URL of the document that listed it
fn resolve_child(parent: &str, child: &str) -> Option<String> {
    let resolved = match Url::parse(parent) {
        Ok(parent) => parent.join(child).ok()?,
        Err(_) => Url::parse(child).ok()?,
    };
    Some(resolved.to_string())
}
