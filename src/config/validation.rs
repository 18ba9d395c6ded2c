use crate::config::types::{BackupConfig, Config, DiscoveryConfig, FetcherConfig, RendererConfig};
use crate::ConfigError;

const MAX_SCROLLS: u32 = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_renderer_config(&config.renderer)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_discovery_config(&config.discovery)?;
    validate_backup_config(&config.backup)?;
    Ok(())
}

fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.window_width == 0 || config.window_height == 0 {
        return Err(ConfigError::Validation(format!(
            "window size must be non-zero, got {}x{}",
            config.window_width, config.window_height
        )));
    }

    if config.chrome_args.iter().any(|arg| arg.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "chrome_args cannot contain empty arguments".to_string(),
        ));
    }

    Ok(())
}

fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    validate_scroll_cap("blog_max_scrolls", config.blog_max_scrolls)?;
    validate_scroll_cap("section_max_scrolls", config.section_max_scrolls)?;

    if config.section_grace_scrolls >= config.section_max_scrolls {
        return Err(ConfigError::Validation(format!(
            "section_grace_scrolls ({}) must be lower than section_max_scrolls ({})",
            config.section_grace_scrolls, config.section_max_scrolls
        )));
    }

    Ok(())
}

fn validate_scroll_cap(name: &str, value: u32) -> Result<(), ConfigError> {
    if value < 1 || value > MAX_SCROLLS {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_SCROLLS, value
        )));
    }
    Ok(())
}

fn validate_backup_config(config: &BackupConfig) -> Result<(), ConfigError> {
    if config.output_root.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output_root cannot be empty".to_string(),
        ));
    }
    Ok(())
}
