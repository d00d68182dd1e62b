//! Import coordinator - orchestrates a single event import
//!
//! Validation and fetching are the only stages that can fail. Once a page
//! body exists, extraction always produces a record, however sparse.

use crate::config::{Config, ExtractionConfig};
use crate::event::ParsedEventData;
use crate::extract::{
    assemble, extract_fallback, extract_structured, retain_usable, FieldSource, PlatformStrategy,
};
use crate::importer::document::EventDocument;
use crate::importer::fetcher::{HttpFetcher, PageFetcher};
use crate::state::{ImportState, StateTracker};
use crate::url::{classify_url, EventUrl};
use crate::{ConfigError, ImportError};

/// Imports event pages through a [`PageFetcher`]
///
/// # Example
///
/// ```no_run
/// use event_import::{Config, Importer};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let importer = Importer::new(&Config::default())?;
/// let event = importer.import("https://www.meetup.com/rust-nyc/events/301234567/").await?;
/// println!("{} on {}", event.title, event.date);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Importer<F = HttpFetcher> {
    fetcher: F,
    extraction: ExtractionConfig,
}

impl Importer<HttpFetcher> {
    /// Creates an importer with its own HTTP client
    ///
    /// Fails before any request is made if the client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        Ok(Self::with_fetcher(fetcher, config.extraction.clone()))
    }
}

impl<F: PageFetcher> Importer<F> {
    /// Creates an importer around a custom fetcher
    pub fn with_fetcher(fetcher: F, extraction: ExtractionConfig) -> Self {
        Self {
            fetcher,
            extraction,
        }
    }

    /// Returns the fetcher used for page requests
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Validates `input`, fetches the page and extracts the event
    ///
    /// No request is made when the URL is invalid or unsupported.
    pub async fn import(&self, input: &str) -> Result<ParsedEventData, ImportError> {
        let mut tracker = StateTracker::new(input.trim());

        let event_url = match classify_url(input) {
            Ok(event_url) => event_url,
            Err(e) => {
                tracker.fail(&e);
                return Err(e);
            }
        };

        tracing::info!(
            "Importing {} event from {}",
            event_url.platform.display_name(),
            event_url.url
        );

        tracker.advance(ImportState::Fetching);
        let page = match self.fetcher.fetch(&event_url.url).await {
            Ok(page) => page,
            Err(e) => {
                tracker.fail(&e);
                return Err(e);
            }
        };

        Ok(run_extraction(
            &page.body,
            &event_url,
            &self.extraction,
            &mut tracker,
        ))
    }
}

/// Extracts an event from an already fetched page body
///
/// Deterministic: the same HTML and URL always produce the same record.
///
/// # Example
///
/// ```
/// use event_import::config::ExtractionConfig;
/// use event_import::{classify_url, extract_event};
///
/// let url = classify_url("https://lu.ma/abc").unwrap();
/// let event = extract_event("<html><head><title>Foo · Luma</title></head></html>", &url, &ExtractionConfig::default());
/// assert_eq!(event.title, "Foo");
/// assert_eq!(event.url, "https://lu.ma/abc");
/// ```
pub fn extract_event(
    html: &str,
    event_url: &EventUrl,
    config: &ExtractionConfig,
) -> ParsedEventData {
    let mut tracker = StateTracker::fetched(event_url.input.as_str());
    run_extraction(html, event_url, config, &mut tracker)
}

/// Validates, fetches and extracts with a one-off importer
pub async fn import_event(input: &str, config: &Config) -> Result<ParsedEventData, ImportError> {
    // Classify before building a client so bad input costs nothing
    let event_url = classify_url(input)?;
    let importer = Importer::new(config).map_err(|e| ImportError::NetworkError {
        url: event_url.url.to_string(),
        message: e.to_string(),
    })?;
    importer.import(input).await
}

fn run_extraction(
    html: &str,
    event_url: &EventUrl,
    config: &ExtractionConfig,
    tracker: &mut StateTracker,
) -> ParsedEventData {
    tracker.advance(ImportState::Parsing);
    let doc = EventDocument::parse(html);

    tracker.advance(ImportState::ExtractingStructured);
    let structured = retain_usable(&extract_structured(&doc, config.timezone), &event_url.url);
    let missing = structured.missing();

    tracker.advance(ImportState::ExtractingFallback);
    let strategy = PlatformStrategy::for_platform(event_url.platform);
    let fallback = extract_fallback(&doc, strategy, &missing, config.timezone);

    let (event, provenance) = assemble(&structured, &fallback, event_url, config);
    tracker.advance(ImportState::Assembled);

    tracing::info!(
        "Extracted '{}' from {}: {} structured, {} fallback, {} default field(s)",
        event.title,
        event_url.url,
        provenance.count(FieldSource::Structured),
        provenance.count(FieldSource::Fallback),
        provenance.count(FieldSource::Default)
    );
    for (field, source) in provenance.entries() {
        tracing::debug!("  {}: {}", field, source);
    }

    event
}
