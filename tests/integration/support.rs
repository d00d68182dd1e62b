//! Shared helpers for integration tests

use event_import::config::FetcherConfig;
use event_import::importer::{FetchedPage, HttpFetcher, PageFetcher};
use event_import::ImportError;
use std::future::Future;
use std::path::PathBuf;
use url::Url;

/// Loads an HTML fixture from `tests/fixtures/`
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Fetcher config with a short deadline for tests
pub fn test_fetcher_config(timeout_secs: u64) -> FetcherConfig {
    FetcherConfig {
        timeout_secs,
        ..Default::default()
    }
}

/// Sends platform URLs to a mock server, keeping path and query
///
/// Lets the full pipeline (URL classification included) run against
/// wiremock, whose address is never a supported platform host.
pub struct MockPlatformFetcher {
    inner: HttpFetcher,
    base: Url,
}

impl MockPlatformFetcher {
    pub fn new(server_uri: &str, timeout_secs: u64) -> Self {
        Self {
            inner: HttpFetcher::new(&test_fetcher_config(timeout_secs))
                .expect("Failed to build HTTP client"),
            base: Url::parse(server_uri).expect("Failed to parse mock server URI"),
        }
    }
}

impl PageFetcher for MockPlatformFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, ImportError>> + Send {
        let mut target = self.base.clone();
        target.set_path(url.path());
        target.set_query(url.query());
        async move { self.inner.fetch_page(&target).await }
    }
}
