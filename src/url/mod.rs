//! URL validation and platform detection
//!
//! An import starts here: the caller's string must be an absolute HTTP(S)
//! URL whose host belongs to one of the supported event platforms. Nothing in
//! this module touches the network.

mod host;

pub use host::{matches_wildcard, normalized_host};

use crate::ImportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Supported event platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Meetup,
    Eventbrite,
    Luma,
}

/// Host patterns per platform, checked in order
const PLATFORM_DOMAINS: &[(&str, Platform)] = &[
    ("*.meetup.com", Platform::Meetup),
    ("*.eventbrite.com", Platform::Eventbrite),
    ("*.lu.ma", Platform::Luma),
];

impl Platform {
    /// Returns all supported platforms
    pub fn all() -> [Self; 3] {
        [Self::Meetup, Self::Eventbrite, Self::Luma]
    }

    /// Machine name used in serialized records (`source` field)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meetup => "meetup",
            Self::Eventbrite => "eventbrite",
            Self::Luma => "luma",
        }
    }

    /// Human-facing platform name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Meetup => "Meetup",
            Self::Eventbrite => "Eventbrite",
            Self::Luma => "Lu.ma",
        }
    }

    /// Comma-separated list of supported platforms for error messages
    pub fn supported_list() -> String {
        Self::all()
            .iter()
            .map(|p| p.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Detects the platform for a lowercase host
    ///
    /// # Examples
    ///
    /// ```
    /// use event_import::url::Platform;
    ///
    /// assert_eq!(Platform::from_host("www.meetup.com"), Some(Platform::Meetup));
    /// assert_eq!(Platform::from_host("lu.ma"), Some(Platform::Luma));
    /// assert_eq!(Platform::from_host("example.com"), None);
    /// ```
    pub fn from_host(host: &str) -> Option<Self> {
        PLATFORM_DOMAINS
            .iter()
            .find(|(pattern, _)| matches_wildcard(pattern, host))
            .map(|(_, platform)| *platform)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated event page URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventUrl {
    /// The caller's input, trimmed; echoed back in the parsed record
    pub input: String,
    /// Parsed absolute URL used for fetching
    pub url: Url,
    /// Platform detected from the host
    pub platform: Platform,
}

/// Validates an input string and detects its event platform
///
/// # Rules
///
/// 1. The trimmed input must parse as an absolute URL → else `InvalidUrl`
/// 2. The scheme must be `http` or `https` and a host must be present →
///    else `InvalidUrl`
/// 3. The host must belong to Meetup, Eventbrite or Lu.ma → else
///    `UnsupportedPlatform`
///
/// # Examples
///
/// ```
/// use event_import::url::{classify_url, Platform};
///
/// let event = classify_url("https://lu.ma/abc123").unwrap();
/// assert_eq!(event.platform, Platform::Luma);
///
/// assert!(classify_url("https://example.com/event").is_err());
/// assert!(classify_url("not a url").is_err());
/// ```
pub fn classify_url(input: &str) -> Result<EventUrl, ImportError> {
    let input = input.trim();

    let url = Url::parse(input).map_err(|e| ImportError::InvalidUrl {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ImportError::InvalidUrl {
            input: input.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    let host = normalized_host(&url).ok_or_else(|| ImportError::InvalidUrl {
        input: input.to_string(),
        reason: "missing host".to_string(),
    })?;

    let platform =
        Platform::from_host(&host).ok_or(ImportError::UnsupportedPlatform { host })?;

    Ok(EventUrl {
        input: input.to_string(),
        url,
        platform,
    })
}
