//! Event import pipeline
//!
//! This module contains the fetch-and-extract flow:
//! - HTTP fetching with a hard deadline
//! - HTML document parsing and lookups
//! - Import orchestration from URL to record

mod coordinator;
mod document;
mod fetcher;

pub use coordinator::{extract_event, import_event, Importer};
pub use document::{collapse_whitespace, EventDocument};
pub use fetcher::{build_http_client, is_page_content_type, FetchedPage, HttpFetcher, PageFetcher};
