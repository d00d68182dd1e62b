//! HTTP fetcher implementation
//!
//! This module performs the single page request of an import:
//! - Building the HTTP client with browser-like headers
//! - Enforcing the overall deadline (connect + headers + body)
//! - Following redirects up to the configured limit
//! - Classifying failures into [`ImportError`] variants
//!
//! The request is cancelled when the deadline passes: the in-flight future
//! is dropped and the pooled-connection limit of zero guarantees nothing is
//! kept alive afterwards.

use crate::config::{FetcherConfig, MAX_TIMEOUT_SECS};
use crate::ImportError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Upper bound for establishing the TCP/TLS connection
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Keeps a deadline within 1..=MAX_TIMEOUT_SECS seconds, whether or not the
/// config went through validation
fn bounded_timeout(timeout: Duration) -> Duration {
    let bounded = timeout.clamp(Duration::from_secs(1), Duration::from_secs(MAX_TIMEOUT_SECS));
    if bounded != timeout {
        tracing::warn!("Fetch timeout {:?} out of range, using {:?}", timeout, bounded);
    }
    bounded
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Decoded page body
    pub body: String,
}

/// Source of page bodies
///
/// The importer only talks to the network through this trait, so callers
/// and tests can substitute their own transport.
pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, ImportError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use event_import::config::FetcherConfig;
/// use event_import::importer::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    for (name, value) in [
        (ACCEPT, &config.accept),
        (ACCEPT_LANGUAGE, &config.accept_language),
    ] {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                headers.insert(name, value);
            }
            Err(e) => tracing::warn!("Ignoring invalid {} header value: {}", name, e),
        }
    }

    let timeout = bounded_timeout(Duration::from_secs(config.timeout_secs));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(CONNECT_TIMEOUT_SECS)))
        .redirect(Policy::limited(config.max_redirects))
        .pool_max_idle_per_host(0)
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher with its own client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            timeout: bounded_timeout(Duration::from_secs(config.timeout_secs)),
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout: bounded_timeout(timeout),
        }
    }

    /// Deadline applied to each fetch
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches a page within the configured deadline
    ///
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Deadline passed | `FetchTimeout` |
    /// | Non-2xx status | `FetchFailed` |
    /// | DNS, connect, TLS, redirect limit | `NetworkError` |
    /// | Non-HTML content type, undecodable body | `ParseFailure` |
    pub async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, ImportError> {
        tracing::debug!("Fetching {}", url);

        match tokio::time::timeout(self.timeout, self.send_request(url)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Request to {} timed out after {:?}", url, self.timeout);
                Err(self.timeout_error(url))
            }
        }
    }

    async fn send_request(&self, url: &Url) -> Result<FetchedPage, ImportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP {} for {}", status.as_u16(), url);
            return Err(ImportError::FetchFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        if final_url != url.as_str() {
            tracing::debug!("Redirected {} -> {}", url, final_url);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(content_type) = content_type.as_deref() {
            if !is_page_content_type(content_type) {
                return Err(ImportError::ParseFailure {
                    url: url.to_string(),
                    message: format!("expected an HTML page, got '{}'", content_type),
                });
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.classify_error(url, e))?;

        tracing::debug!("Fetched {} ({} bytes)", final_url, body.len());

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }

    fn timeout_error(&self, url: &Url) -> ImportError {
        ImportError::FetchTimeout {
            url: url.to_string(),
            seconds: self.timeout.as_secs(),
        }
    }

    fn classify_error(&self, url: &Url, error: reqwest::Error) -> ImportError {
        if error.is_timeout() {
            self.timeout_error(url)
        } else if error.is_decode() {
            ImportError::ParseFailure {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else if error.is_redirect() {
            ImportError::NetworkError {
                url: url.to_string(),
                message: format!("redirect error: {}", error),
            }
        } else {
            ImportError::NetworkError {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, ImportError>> + Send {
        self.fetch_page(url)
    }
}

/// Returns true for content types that can carry an event page
pub fn is_page_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("html") || content_type.contains("xml") || content_type.starts_with("text/")
}
