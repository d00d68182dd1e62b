use crate::config::types::{
    Config, ExtractionConfig, FetcherConfig, MAX_DESCRIPTION_CHARS, MAX_TIMEOUT_SECS,
};
use crate::ConfigError;
use reqwest::header::HeaderValue;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_extraction_config(&config.extraction)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be at most 20, got {}",
            config.max_redirects
        )));
    }

    validate_header("user-agent", &config.user_agent)?;
    validate_header("accept", &config.accept)?;
    validate_header("accept-language", &config.accept_language)?;

    Ok(())
}

/// Validates extraction configuration
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if config.description_max_chars < 1 || config.description_max_chars > MAX_DESCRIPTION_CHARS {
        return Err(ConfigError::Validation(format!(
            "description-max-chars must be between 1 and {}, got {}",
            MAX_DESCRIPTION_CHARS, config.description_max_chars
        )));
    }

    Ok(())
}

/// Header values must be non-empty and legal in an HTTP header
fn validate_header(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }

    if HeaderValue::from_str(value).is_err() {
        return Err(ConfigError::Validation(format!(
            "{} contains characters not allowed in an HTTP header",
            name
        )));
    }

    Ok(())
}
