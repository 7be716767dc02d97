use site_harvester::config::Config;
use site_harvester::crawler::count_words;
use site_harvester::output::{read_manifest, write_harvest, HarvestSummary};
use site_harvester::{CrawlProgress, Harvester};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration with short timeouts for local mock servers
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.timeouts.manifest_timeout_ms = 2_000;
    config.timeouts.robots_timeout_ms = 2_000;
    config.timeouts.page_timeout_ms = 2_000;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

fn urlset(locs: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for loc in locs {
        xml.push_str(&format!("<url><loc>{}</loc></url>", loc));
    }
    xml.push_str("</urlset>");
    xml
}

fn html_page(title: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{}</title>
        <meta name="description" content="About {}"></head>
        <body><nav><a href="/">Home</a></nav><h1>{}</h1>{}</body></html>"#,
        title, title, title, body
    )
}

async fn mount_page(server: &MockServer, route: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(title, body))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_from_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    let locs = vec![
        format!("{}/", base),
        format!("{}/about", base),
        format!("{}/missing", base),
    ];
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&locs)))
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/",
        "Home",
        r#"<p>Welcome to the home page of our small test site.</p>
        <a href="/about">About</a>"#,
    )
    .await;
    mount_page(
        &server,
        "/about",
        "About",
        "<p>We are a team that writes tests for web crawlers.</p>",
    )
    .await;

    let harvester = Harvester::new(create_test_config()).unwrap();
    let mut events: Vec<CrawlProgress> = Vec::new();
    let harvest = harvester
        .harvest(&base, |progress| events.push(progress.clone()))
        .await;

    assert_eq!(harvest.site_url, base);
    assert_eq!(harvest.manifest.len(), 3);

    // The 404 page is dropped without aborting the others
    assert_eq!(harvest.pages.len(), 2);
    assert!(harvest.pages.iter().all(|p| !p.url.ends_with("/missing")));

    assert_eq!(events.len(), 3);
    assert_eq!(
        events.iter().map(|e| e.current).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(events.iter().all(|e| e.total == 3));

    let home = harvest
        .pages
        .iter()
        .find(|p| p.title == "Home")
        .expect("home page crawled");
    assert_eq!(home.description, "About Home");
    assert_eq!(home.headings[0].text, "Home");
    assert!(home
        .internal_links
        .contains(&format!("{}/about", base)));

    for page in &harvest.pages {
        assert_eq!(page.word_count(), count_words(&page.content));
        assert!(page.word_count() > 0);
    }

    // Persist and read back
    let dir = TempDir::new().unwrap();
    write_harvest(dir.path(), &harvest).unwrap();
    assert_eq!(read_manifest(dir.path()), harvest.manifest);

    let summary = HarvestSummary::from_harvest(&harvest);
    assert_eq!(summary.pages_crawled, 2);
    assert_eq!(summary.manifest_entries, 3);
    assert_eq!(summary.missing_titles, 0);
}

#[tokio::test]
async fn test_harvest_falls_back_to_site_root() {
    let server = MockServer::start().await;
    let base = server.uri();

    // No sitemap and no robots.txt: every other path is a 404
    mount_page(
        &server,
        "/",
        "Lonely",
        "<p>This site has no sitemap at all, only a root page.</p>",
    )
    .await;

    let harvester = Harvester::new(create_test_config()).unwrap();
    let mut events = 0;
    let harvest = harvester.harvest(&base, |_| events += 1).await;

    assert!(harvest.manifest.is_empty());
    assert_eq!(harvest.pages.len(), 1);
    assert_eq!(harvest.pages[0].title, "Lonely");
    assert_eq!(events, 1);
}

#[tokio::test]
async fn test_harvest_respects_page_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    let locs: Vec<String> = (0..10).map(|i| format!("{}/page{}", base, i)).collect();
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&locs)))
        .mount(&server)
        .await;

    for i in 0..10 {
        mount_page(
            &server,
            &format!("/page{}", i),
            &format!("Page {}", i),
            "<p>Some filler text for a numbered page.</p>",
        )
        .await;
    }

    let harvester = Harvester::new(create_test_config()).unwrap();
    let mut events: Vec<CrawlProgress> = Vec::new();
    let harvest = harvester
        .harvest_with_budget(&base, 5, |progress| events.push(progress.clone()))
        .await;

    assert_eq!(harvest.manifest.len(), 10);
    assert_eq!(harvest.pages.len(), 5);
    assert_eq!(
        events.iter().map(|e| e.current).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );

    // Selection is positional: only the first five sitemap entries
    let selected = &locs[..5];
    assert!(events.iter().all(|e| selected.contains(&e.url)));
    assert!(harvest.pages.iter().all(|p| selected.contains(&p.url)));
}

#[tokio::test]
async fn test_unreachable_site_yields_empty_harvest() {
    // Nothing listens on port 1
    let base = "http://127.0.0.1:1";

    let harvester = Harvester::new(create_test_config()).unwrap();
    let mut events = 0;
    let harvest = harvester.harvest(base, |_| events += 1).await;

    assert!(harvest.manifest.is_empty());
    assert!(harvest.pages.is_empty());
    // The root fallback is still attempted once
    assert_eq!(events, 1);
}

#[tokio::test]
async fn test_top_level_harvest_entry_point() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", "Entry", "<p>Reached through the crate-level function.</p>").await;

    let harvest = site_harvester::crawler::harvest(create_test_config(), &base, |_| {})
        .await
        .unwrap();

    assert_eq!(harvest.pages.len(), 1);
    assert_eq!(harvest.pages[0].title, "Entry");
}
