//! Site-Harvester main entry point
//!
//! This is the command-line interface for the Site-Harvester page inventory tool.

use anyhow::Context;
use clap::Parser;
use site_harvester::config::{load_config, validate, Config};
use site_harvester::output::{print_summary, write_harvest, HarvestSummary};
use site_harvester::url::site_url_from_property;
use site_harvester::Harvester;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Harvester: sitemap-driven page inventory
///
/// Site-Harvester discovers the pages a site lists in its sitemap, fetches
/// them a few at a time and records title, description, headings, internal
/// links and main content for each one.
#[derive(Parser, Debug)]
#[command(name = "site-harvester")]
#[command(version = "1.0.0")]
#[command(about = "Sitemap-driven page inventory", long_about = None)]
struct Cli {
    /// Site URL or `sc-domain:` property to harvest
    #[arg(value_name = "SITE")]
    site: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to crawl (overrides the configuration)
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Directory receiving sitemap.json and site-context.json
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Resolve the sitemap and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(dir) = &cli.output {
        config.output.directory = dir.display().to_string();
    }
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(config, &cli.site).await
    } else {
        handle_harvest(config, &cli.site).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_harvester=info,warn"),
            1 => EnvFilter::new("site_harvester=debug,info"),
            2 => EnvFilter::new("site_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the settings and the sitemap selection
async fn handle_dry_run(config: Config, site: &str) -> anyhow::Result<()> {
    println!("=== Site-Harvester Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Concurrency: {}", config.crawler.concurrency);
    println!("  Max pages: {}", config.crawler.max_pages);

    println!("\nTimeouts:");
    println!("  Sitemap: {}ms", config.timeouts.manifest_timeout_ms);
    println!("  robots.txt: {}ms", config.timeouts.robots_timeout_ms);
    println!("  Page: {}ms", config.timeouts.page_timeout_ms);

    println!("\nUser Agent:");
    println!("  Pages: {}", config.user_agent.page_agent());
    println!("  Sitemaps: {}", config.user_agent.manifest_agent());

    println!("\nSitemap candidates:");
    for path in &config.manifest.candidate_paths {
        println!("  - {}", path);
    }

    let max_pages = config.crawler.max_pages;
    let site_url = site_url_from_property(site);
    let harvester = Harvester::new(config)?;
    let manifest = harvester.resolver().resolve(&site_url).await;

    println!("\nSite: {}", site_url);
    println!("Sitemap entries: {}", manifest.len());
    if manifest.is_empty() {
        println!("✓ Would crawl {} only", site_url);
    } else {
        println!(
            "✓ Would crawl {} of {} sitemap entries",
            manifest.len().min(max_pages),
            manifest.len()
        );
    }

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config, site: &str) -> anyhow::Result<()> {
    let output_dir = PathBuf::from(&config.output.directory);
    let harvester = Harvester::new(config)?;

    let harvest = harvester
        .harvest(site, |progress| {
            tracing::info!(
                "[{}/{}] {}",
                progress.current,
                progress.total,
                progress.url
            );
        })
        .await;

    let written = write_harvest(&output_dir, &harvest)
        .with_context(|| format!("failed to write results to {}", output_dir.display()))?;

    print_summary(&HarvestSummary::from_harvest(&harvest));
    println!("\n✓ Pages written to: {}", written.pages.display());
    println!("✓ Sitemap written to: {}", written.manifest.display());

    Ok(())
}
