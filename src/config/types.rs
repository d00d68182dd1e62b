use serde::Deserialize;

/// Browser-like User-Agent sent with every fetch
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Accept header matching a desktop browser navigation request
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Hard ceiling for a single page fetch, in seconds
pub const MAX_TIMEOUT_SECS: u64 = 15;

/// Upper bound for the description field, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Main configuration structure
///
/// Every section and key is optional; a missing file is equivalent to
/// `Config::default()`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetcherConfig {
    /// Request ceiling covering connect, send and body read (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept header value
    pub accept: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Maximum number of redirects followed before giving up
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: MAX_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            max_redirects: 10,
        }
    }
}

/// How offset-bearing start timestamps are split into date and time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezonePolicy {
    /// Keep the wall-clock date and time written in the timestamp
    #[default]
    Source,
    /// Convert to UTC before splitting
    Utc,
}

/// Field extraction and normalization configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    pub timezone: TimezonePolicy,

    /// Description truncation length, in characters
    #[serde(rename = "description-max-chars")]
    pub description_max_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            timezone: TimezonePolicy::Source,
            description_max_chars: MAX_DESCRIPTION_CHARS,
        }
    }
}
