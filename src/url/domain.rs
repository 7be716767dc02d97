use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_harvester::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the hostname of `url` with a leading `www.` removed
///
/// Used to compare sites so that `www.example.com` and `example.com` are
/// treated as the same site. Returns None when the string is not an
/// absolute URL with a host.
///
/// # Examples
///
/// ```
/// use site_harvester::url::root_domain;
///
/// assert_eq!(root_domain("https://www.example.com/a"), Some("example.com".to_string()));
/// assert_eq!(root_domain("not a url"), None);
/// ```
pub fn root_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let domain = extract_domain(&parsed)?;
    Some(match domain.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => domain,
    })
}

/// Checks whether `url` belongs to the site whose root domain is `root`
///
/// `root` must already have been reduced with [`root_domain`].
pub fn is_same_site(url: &str, root: &str) -> bool {
    root_domain(url).is_some_and(|domain| domain == root)
}
