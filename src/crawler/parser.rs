//! Structural HTML pass
//!
//! This module extracts the page outline from a parsed document:
//! - Page title and meta description
//! - Headings (h1 through h6) in document order
//! - Internal links (same host as the page), deduplicated

use crate::crawler::page::Heading;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Outline extracted from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (empty when the page has none)
    pub title: String,

    /// The `<meta name="description">` content (empty when absent)
    pub description: String,

    /// Non-empty headings in document order
    pub headings: Vec<Heading>,

    /// Absolute URLs on the page's own host, first-seen order
    pub internal_links: Vec<String>,
}

/// Parses HTML content and extracts the page outline
///
/// # Example
///
/// ```
/// use site_harvester::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &page_url);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.internal_links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, page_url: &Url) -> ParsedPage {
    parse_document(&Html::parse_document(html), page_url)
}

/// Extracts the page outline from an already parsed document
pub fn parse_document(document: &Html, page_url: &Url) -> ParsedPage {
    ParsedPage {
        title: extract_title(document),
        description: extract_description(document),
        headings: extract_headings(document),
        internal_links: extract_internal_links(document, page_url),
    }
}

/// Text of the first `<title>` element, trimmed
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn extract_description(document: &Html) -> String {
    let Ok(selector) = Selector::parse(r#"meta[name="description"]"#) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

fn extract_headings(document: &Html) -> Vec<Heading> {
    let Ok(selector) = Selector::parse("h1, h2, h3, h4, h5, h6") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let level = heading_level(&element)?;
            let text = element.text().collect::<String>().trim().to_string();
            (!text.is_empty()).then_some(Heading { level, text })
        })
        .collect()
}

fn heading_level(element: &ElementRef) -> Option<u8> {
    element
        .value()
        .name()
        .strip_prefix('h')?
        .parse::<u8>()
        .ok()
        .filter(|level| (1..=6).contains(level))
}

/// Collects anchors that resolve to the page's own host
///
/// Hostnames must match exactly; `www.` is significant here.
fn extract_internal_links(document: &Html, page_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let page_host = page_url.host_str();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        // Skip if it has the download attribute
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(resolved) = element
            .value()
            .attr("href")
            .and_then(|href| resolve_link(href, page_url))
        else {
            continue;
        };

        if resolved.host_str() != page_host {
            continue;
        }

        let resolved = resolved.to_string();
        if seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only anchors
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    matches!(absolute_url.scheme(), "http" | "https").then_some(absolute_url)
}
