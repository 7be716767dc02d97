//! Robots.txt handling module
//!
//! This module fetches a site's robots.txt and reads the sitemap locations it
//! declares. It is used as the fallback when no sitemap is found at the
//! usual paths.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::{fetch_text, FetchOptions};
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;

/// Fetches robots.txt for a site
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `site_root` - Normalized site root (no trailing slash)
/// * `timeout` - Request timeout
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - Successfully fetched and parsed robots.txt
/// * `Err(FetchError)` - Failed to fetch
pub async fn fetch_robots(
    client: &Client,
    site_root: &str,
    timeout: Duration,
) -> Result<ParsedRobots, FetchError> {
    let robots_url = format!("{}/robots.txt", site_root);
    let options = FetchOptions {
        timeout,
        accept: "text/plain, */*",
        user_agent: None,
    };
    let content = fetch_text(client, &robots_url, options).await?;
    Ok(ParsedRobots::from_content(&content))
}
