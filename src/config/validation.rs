use crate::config::types::{Config, CrawlerConfig, ManifestConfig, TimeoutConfig, UserAgentConfig};
use crate::ConfigError;

/// Smallest accepted per-request timeout
const MIN_TIMEOUT_MS: u64 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_timeouts(&config.timeouts)?;
    validate_manifest_config(&config.manifest)?;
    validate_user_agent_config(&config.user_agent)?;

    if config.output.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(
            "max_pages must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_timeouts(config: &TimeoutConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("manifest_timeout_ms", config.manifest_timeout_ms),
        ("robots_timeout_ms", config.robots_timeout_ms),
        ("page_timeout_ms", config.page_timeout_ms),
    ] {
        if value < MIN_TIMEOUT_MS {
            return Err(ConfigError::Validation(format!(
                "{} must be >= {}ms, got {}ms",
                name, MIN_TIMEOUT_MS, value
            )));
        }
    }

    Ok(())
}

fn validate_manifest_config(config: &ManifestConfig) -> Result<(), ConfigError> {
    if config.candidate_paths.is_empty() {
        return Err(ConfigError::Validation(
            "candidate_paths must list at least one sitemap path".to_string(),
        ));
    }

    if let Some(path) = config.candidate_paths.iter().find(|p| !p.starts_with('/')) {
        return Err(ConfigError::Validation(format!(
            "candidate path '{}' must start with '/'",
            path
        )));
    }

    if config.max_index_depth < 1 {
        return Err(ConfigError::Validation(
            "max_index_depth must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}
