//! Integration tests for event imports
//!
//! HTTP behaviour is exercised against wiremock servers; extraction against
//! the per-platform HTML fixtures in `tests/fixtures/`.

mod cancellation_tests;
mod fetch_tests;
mod fixture_tests;
mod import_tests;
mod support;
