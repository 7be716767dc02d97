//! Robots.txt parser implementation
//!
//! Only `Sitemap:` directives are read; access rules are not interpreted.

/// Parsed robots.txt data
#[derive(Debug, Clone, Default)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Returns every sitemap location declared with a `Sitemap:` directive
    ///
    /// The directive name is matched case-insensitively. Locations are
    /// returned in file order; empty values are skipped.
    pub fn sitemaps(&self) -> Vec<String> {
        self.content
            .lines()
            .filter_map(|line| {
                let (key, value) = line.trim().split_once(':')?;
                if !key.trim().eq_ignore_ascii_case("sitemap") {
                    return None;
                }
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sitemap() {
        let robots = ParsedRobots::from_content(
            "User-agent: *\nDisallow: /admin\nSitemap: https://example.com/custom.xml\n",
        );
        assert_eq!(robots.sitemaps(), vec!["https://example.com/custom.xml"]);
    }

    #[test]
    fn test_multiple_sitemaps_in_order() {
        let robots = ParsedRobots::from_content(
            "Sitemap: https://example.com/a.xml\nUser-agent: *\nsitemap: https://example.com/b.xml",
        );
        assert_eq!(
            robots.sitemaps(),
            vec!["https://example.com/a.xml", "https://example.com/b.xml"]
        );
    }

    #[test]
    fn test_case_insensitive_and_crlf() {
        let robots = ParsedRobots::from_content("SITEMAP:   https://example.com/s.xml  \r\n");
        assert_eq!(robots.sitemaps(), vec!["https://example.com/s.xml"]);
    }

    #[test]
    fn test_url_colon_is_preserved() {
        let robots = ParsedRobots::from_content("Sitemap: https://example.com:8443/s.xml");
        assert_eq!(robots.sitemaps(), vec!["https://example.com:8443/s.xml"]);
    }

    #[test]
    fn test_empty_and_unrelated() {
        let robots = ParsedRobots::from_content("User-agent: *\nSitemap:\nCrawl-delay: 5");
        assert!(robots.sitemaps().is_empty());
        assert!(ParsedRobots::default().sitemaps().is_empty());
    }

    #[test]
    fn test_similar_directive_names_ignored() {
        let robots = ParsedRobots::from_content("Sitemap-index: https://example.com/x.xml");
        assert!(robots.sitemaps().is_empty());
    }
}
