//! Configuration module for Site-Harvester
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All values have defaults, so a harvest can run without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use site_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Fetching {} pages at a time", config.crawler.concurrency);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, CrawlerConfig, ManifestConfig, OutputConfig, TimeoutConfig, UserAgentConfig,
};

pub use parser::{load_config, parse_config};
pub use validation::validate;
