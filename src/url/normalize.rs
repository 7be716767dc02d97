/// Prefix Search Console uses for domain-level properties
const DOMAIN_PROPERTY_PREFIX: &str = "sc-domain:";

/// Normalizes a site root for path concatenation
///
/// Surrounding whitespace and every trailing slash are removed, so that
/// candidate paths such as `/sitemap.xml` can be appended directly.
///
/// # Examples
///
/// ```
/// use site_harvester::url::normalize_site_root;
///
/// assert_eq!(normalize_site_root("https://example.com///"), "https://example.com");
/// assert_eq!(normalize_site_root(" https://example.com/blog/ "), "https://example.com/blog");
/// ```
pub fn normalize_site_root(site_root: &str) -> String {
    site_root.trim().trim_end_matches('/').to_string()
}

/// Converts a Search Console domain property into a crawlable site URL
///
/// `sc-domain:example.com` becomes `https://example.com`; URL-prefix
/// properties and plain URLs are returned unchanged.
///
/// # Examples
///
/// ```
/// use site_harvester::url::site_url_from_property;
///
/// assert_eq!(site_url_from_property("sc-domain:example.com"), "https://example.com");
/// assert_eq!(site_url_from_property("https://example.com/"), "https://example.com/");
/// ```
pub fn site_url_from_property(property: &str) -> String {
    let property = property.trim();
    match property.strip_prefix(DOMAIN_PROPERTY_PREFIX) {
        Some(domain) => format!("https://{}", domain.trim()),
        None => property.to_string(),
    }
}
