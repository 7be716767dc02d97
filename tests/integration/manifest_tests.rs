use site_harvester::config::Config;
use site_harvester::crawler::build_http_client;
use site_harvester::ManifestResolver;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver() -> ManifestResolver {
    let config = Config::default();
    let client = build_http_client(&config.user_agent).unwrap();
    ManifestResolver::new(client, &config)
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_robots_declared_index_is_expanded() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /private\nSitemap: {}/maps/index.xml\n",
            base
        )))
        .mount(&server)
        .await;

    mount_xml(
        &server,
        "/maps/index.xml",
        format!(
            r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <sitemap><loc>{base}/maps/posts.xml</loc></sitemap>
            <sitemap><loc>{base}/maps/pages.xml</loc></sitemap>
            </sitemapindex>"#
        ),
    )
    .await;

    mount_xml(
        &server,
        "/maps/posts.xml",
        format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>{base}/posts/1</loc><lastmod>2024-03-01</lastmod></url>
            <url><loc>{base}/posts/2</loc></url>
            </urlset>"#
        ),
    )
    .await;

    mount_xml(
        &server,
        "/maps/pages.xml",
        format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>{base}/about</loc></url>
            <url><loc>{base}/posts/1</loc></url>
            <url><loc>https://elsewhere.example/contact</loc></url>
            </urlset>"#
        ),
    )
    .await;

    let entries = resolver().resolve(&base).await;
    let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();

    assert_eq!(
        locs,
        vec![
            format!("{}/posts/1", base),
            format!("{}/posts/2", base),
            format!("{}/about", base),
        ]
    );
    assert_eq!(entries[0].lastmod.as_deref(), Some("2024-03-01"));
}

#[tokio::test]
async fn test_malformed_sitemap_falls_through_to_next_candidate() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Not found</body>"))
        .mount(&server)
        .await;

    mount_xml(
        &server,
        "/sitemap_index.xml",
        format!(
            r#"<urlset><url><loc>{base}/only</loc></url></urlset>"#
        ),
    )
    .await;

    let entries = resolver().resolve(&format!("{}/", base)).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].loc, format!("{}/only", base));
}
