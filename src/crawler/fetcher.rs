//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the shared HTTP client with the crawler's user agent
//! - Bounded-time text fetches used for sitemaps, robots.txt and pages
//! - The page fetcher that turns one URL into a [`PageRecord`]

use crate::config::{TimeoutConfig, UserAgentConfig};
use crate::crawler::extract::ExtractionChain;
use crate::crawler::page::PageRecord;
use crate::crawler::parser::parse_document;
use crate::FetchError;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use scraper::Html;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Accept header sent with page requests
pub const PAGE_ACCEPT: &str = "text/html,application/xhtml+xml";

/// Builds an HTTP client with proper configuration
///
/// The client identifies itself with the page user agent; requests that need
/// a different identity override the header per request.
///
/// # Example
///
/// ```no_run
/// use site_harvester::config::UserAgentConfig;
/// use site_harvester::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.page_agent())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Options for a single text fetch
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions<'a> {
    pub timeout: Duration,
    pub accept: &'a str,
    /// Overrides the client's default user agent when set
    pub user_agent: Option<&'a str>,
}

/// Fetches a URL and returns its body as text
///
/// Any status outside 2xx is an error, as is exceeding `options.timeout`.
pub async fn fetch_text(
    client: &Client,
    url: &str,
    options: FetchOptions<'_>,
) -> Result<String, FetchError> {
    let mut request = client
        .get(url)
        .timeout(options.timeout)
        .header(ACCEPT, options.accept);
    if let Some(agent) = options.user_agent {
        request = request.header(USER_AGENT, agent);
    }

    let response = request
        .send()
        .await
        .map_err(|source| classify_error(url, source))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| classify_error(url, source))
}

fn classify_error(url: &str, source: reqwest::Error) -> FetchError {
    if source.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source,
        }
    }
}

/// Something that can turn a URL into a page record
///
/// The crawl scheduler is generic over this so that fetching can be swapped
/// out, e.g. for instrumented stubs in tests.
pub trait PageFetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<PageRecord, FetchError>> + Send;
}

/// Fetches pages over HTTP and extracts their content
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
    extractors: Arc<ExtractionChain>,
}

impl PageFetcher {
    pub fn new(client: Client, timeouts: &TimeoutConfig) -> Self {
        Self::with_extractors(client, timeouts, ExtractionChain::default())
    }

    pub fn with_extractors(
        client: Client,
        timeouts: &TimeoutConfig,
        extractors: ExtractionChain,
    ) -> Self {
        Self {
            client,
            timeout: timeouts.page_timeout(),
            extractors: Arc::new(extractors),
        }
    }

    /// Fetches one page and builds its record
    ///
    /// Network and status failures are returned as errors. Extraction never
    /// fails: missing pieces come back empty.
    pub async fn fetch_page(&self, url: &str) -> Result<PageRecord, FetchError> {
        let page_url = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let options = FetchOptions {
            timeout: self.timeout,
            accept: PAGE_ACCEPT,
            user_agent: None,
        };
        let body = fetch_text(&self.client, url, options).await?;

        Ok(self.build_record(url, &page_url, &body))
    }

    /// Runs the structural and main-content passes over a fetched body
    pub fn build_record(&self, url: &str, page_url: &Url, body: &str) -> PageRecord {
        let document = Html::parse_document(body);
        let parsed = parse_document(&document, page_url);
        let content = self.extractors.extract(&document);

        PageRecord::new(
            url.to_string(),
            parsed.title,
            parsed.description,
            parsed.headings,
            content,
            parsed.internal_links,
        )
    }
}

impl PageFetch for PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<PageRecord, FetchError>> + Send {
        self.fetch_page(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, headers, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(page_timeout_ms: u64) -> PageFetcher {
        let client = build_http_client(&UserAgentConfig::default()).unwrap();
        let timeouts = TimeoutConfig {
            page_timeout_ms,
            ..TimeoutConfig::default()
        };
        PageFetcher::new(client, &timeouts)
    }

    struct HeadingsOnly;

    impl crate::crawler::ContentExtractor for HeadingsOnly {
        fn name(&self) -> &'static str {
            "headings-only"
        }

        fn extract(&self, document: &Html) -> Option<String> {
            let selector = scraper::Selector::parse("h1, h2").ok()?;
            let text: Vec<String> = document
                .select(&selector)
                .map(|h| h.text().collect::<String>())
                .collect();
            Some(text.join(" "))
        }
    }

    #[tokio::test]
    async fn test_custom_extractors_drive_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/guide"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><body><h1>Setup</h1><p>Long body text that is ignored.</p><h2>Usage</h2></body></html>",
            ))
            .mount(&server)
            .await;

        let client = build_http_client(&UserAgentConfig::default()).unwrap();
        let fetcher = PageFetcher::with_extractors(
            client,
            &TimeoutConfig::default(),
            ExtractionChain::new(vec![Box::new(HeadingsOnly)]),
        );

        let record = fetcher
            .fetch_page(&format!("{}/guide", server.uri()))
            .await
            .unwrap();
        assert_eq!(record.content, "Setup Usage");
        assert_eq!(record.word_count(), 2);
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&UserAgentConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_page_builds_record() {
        let server = MockServer::start().await;
        let body = r#"<html><head><title>Home</title>
            <meta name="description" content="Welcome">
        </head><body>
            <h1>Hello</h1>
            <p>Some words on the page.</p>
            <a href="/about">About</a>
            <a href="https://other.com/">Other</a>
        </body></html>"#;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("user-agent", "SiteHarvester/1.0"))
            .and(headers("accept", vec!["text/html", "application/xhtml+xml"]))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .insert_header("content-type", "text/html"),
            )
            .mount(&server)
            .await;

        let url = format!("{}/", server.uri());
        let page = fetcher(15_000).fetch_page(&url).await.unwrap();

        assert_eq!(page.url, url);
        assert_eq!(page.title, "Home");
        assert_eq!(page.description, "Welcome");
        assert_eq!(page.headings.len(), 1);
        assert_eq!(page.internal_links, vec![format!("{}/about", server.uri())]);
        assert!(page.content.contains("Some words on the page."));
        assert_eq!(page.word_count(), page.content.split_whitespace().count());
    }

    #[tokio::test]
    async fn test_not_found_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = fetcher(15_000).fetch_page(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.url(), url);
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let url = format!("{}/slow", server.uri());
        let err = fetcher(200).fetch_page(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let err = fetcher(15_000).fetch_page("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_empty_body_yields_empty_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let page = fetcher(15_000)
            .fetch_page(&format!("{}/blank", server.uri()))
            .await
            .unwrap();
        assert_eq!(page.title, "");
        assert_eq!(page.content, "");
        assert_eq!(page.word_count(), 0);
        assert!(page.headings.is_empty());
    }
}
