//! event-import: event page extraction for Meetup, Eventbrite and Lu.ma
//!
//! This crate fetches a single public event page and turns it into a
//! normalized [`ParsedEventData`] record that can pre-fill an event creation
//! form for human review. Structured data (JSON-LD) is preferred; per-platform
//! CSS selector and meta-tag cascades fill whatever it leaves empty.

pub mod config;
pub mod event;
pub mod extract;
pub mod importer;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for event imports
///
/// Every terminal failure of an import is one of these variants. Extraction
/// gaps are never errors: once a page body was obtained the import succeeds.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error(
        "Unsupported platform '{host}'. Supported platforms: {supported}",
        supported = crate::url::Platform::supported_list()
    )]
    UnsupportedPlatform { host: String },

    #[error("Request timeout for {url} after {seconds}s")]
    FetchTimeout { url: String, seconds: u64 },

    #[error("HTTP {status} for {url}; the event may be private or removed")]
    FetchFailed { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    NetworkError { url: String, message: String },

    #[error("Could not read page {url}: {message}")]
    ParseFailure { url: String, message: String },
}

/// Discriminant of an [`ImportError`], suitable for callers that branch on
/// the failure type (retry, manual entry, fix the URL)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    UnsupportedPlatform,
    FetchTimeout,
    FetchFailed(u16),
    NetworkError,
    ParseFailure,
}

impl ImportError {
    /// Returns the error discriminant
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            Self::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            Self::FetchTimeout { .. } => ErrorKind::FetchTimeout,
            Self::FetchFailed { status, .. } => ErrorKind::FetchFailed(*status),
            Self::NetworkError { .. } => ErrorKind::NetworkError,
            Self::ParseFailure { .. } => ErrorKind::ParseFailure,
        }
    }

    /// Returns true for errors the caller can fix by changing the input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl { .. } | Self::UnsupportedPlatform { .. }
        )
    }
}

impl ErrorKind {
    /// Snake-case name used in the output envelope
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalid_url",
            Self::UnsupportedPlatform => "unsupported_platform",
            Self::FetchTimeout => "fetch_timeout",
            Self::FetchFailed(_) => "fetch_failed",
            Self::NetworkError => "network_error",
            Self::ParseFailure => "parse_failure",
        }
    }

    /// HTTP status carried by the error, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::FetchFailed(status) => Some(*status),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type alias for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::event::ParsedEventData;
pub use crate::importer::{extract_event, import_event, Importer};
pub use crate::output::ImportOutcome;
pub use crate::state::ImportState;
pub use crate::url::{classify_url, EventUrl, Platform};
