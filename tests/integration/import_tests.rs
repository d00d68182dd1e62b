//! End-to-end imports: URL in, record or error out
//!
//! Platform URLs are routed to a wiremock server by `MockPlatformFetcher`,
//! so classification, fetching and extraction all run for real.

use crate::support::{fixture, MockPlatformFetcher};
use event_import::config::ExtractionConfig;
use event_import::output::ImportOutcome;
use event_import::{ImportError, Importer, Platform};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn importer(server: &MockServer) -> Importer<MockPlatformFetcher> {
    Importer::with_fetcher(
        MockPlatformFetcher::new(&server.uri(), 5),
        ExtractionConfig::default(),
    )
}

async fn serve_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_luma_json_ld_import() {
    let server = MockServer::start().await;
    serve_html(
        &server,
        "/abc",
        r#"<html><head><script type="application/ld+json">
            {"@type":"Event","startDate":"2025-06-01T18:00:00Z","location":{"name":"Rooftop Bar"}}
        </script></head><body></body></html>"#
            .to_string(),
    )
    .await;

    let event = importer(&server)
        .import("https://lu.ma/abc")
        .await
        .expect("Import should succeed");

    assert_eq!(event.date, "2025-06-01");
    assert_eq!(event.time, "18:00");
    assert_eq!(event.location, "Rooftop Bar");
    assert_eq!(event.source, Platform::Luma);
    assert_eq!(event.url, "https://lu.ma/abc");
}

#[tokio::test]
async fn test_eventbrite_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = importer(&server)
        .import("https://www.eventbrite.com/e/removed-event-123")
        .await;

    assert!(matches!(
        result,
        Err(ImportError::FetchFailed { status: 404, .. })
    ));

    let outcome = ImportOutcome::from(result);
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["status"], "failure");
    assert_eq!(value["kind"], "fetch_failed");
    assert_eq!(value["http_status"], 404);
}

#[tokio::test]
async fn test_meetup_title_only_page() {
    let server = MockServer::start().await;
    serve_html(
        &server,
        "/rust/events/1/",
        "<html><head><title>Foo | Meetup</title></head><body></body></html>".to_string(),
    )
    .await;

    let event = importer(&server)
        .import("https://www.meetup.com/rust/events/1/")
        .await
        .expect("Import should succeed");

    assert_eq!(event.title, "Foo");
    assert_eq!(event.description, "");
    assert_eq!(event.date, "");
    assert_eq!(event.time, "");
    assert_eq!(event.location, "");
    assert_eq!(event.organizer, "");
    assert_eq!(event.attendees, None);
    assert_eq!(event.image, "");
    assert_eq!(event.source, Platform::Meetup);
}

#[tokio::test]
async fn test_unsupported_platform_makes_no_http_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = importer(&server)
        .import("https://example.com/event")
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::UnsupportedPlatform { .. }));
    assert!(server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
}

#[tokio::test]
async fn test_lookalike_domain_rejected() {
    let server = MockServer::start().await;

    let err = importer(&server)
        .import("https://meetup.com.evil.example/events/1")
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::UnsupportedPlatform { .. }));
    assert!(server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
}

#[tokio::test]
async fn test_json_ld_start_beats_selectors() {
    let server = MockServer::start().await;
    serve_html(
        &server,
        "/e/conflict-1",
        r#"<html><head><script type="application/ld+json">
            {"@type":"Event","name":"JSON Name","startDate":"2025-09-01T09:00:00"}
        </script></head><body>
            <h1 class="event-title">Markup Name</h1>
            <time class="start-date" datetime="2025-10-10T20:00:00">Oct 10</time>
        </body></html>"#
            .to_string(),
    )
    .await;

    let event = importer(&server)
        .import("https://www.eventbrite.com/e/conflict-1")
        .await
        .unwrap();

    assert_eq!(event.title, "JSON Name");
    assert_eq!(event.date, "2025-09-01");
    assert_eq!(event.time, "09:00");
}

#[tokio::test]
async fn test_page_without_json_ld_uses_fallback() {
    let server = MockServer::start().await;
    serve_html(
        &server,
        "/tabletop-nyc/events/305000001/",
        fixture("meetup_markup_only.html"),
    )
    .await;

    let event = importer(&server)
        .import("https://www.meetup.com/tabletop-nyc/events/305000001/")
        .await
        .unwrap();

    assert_eq!(event.title, "Board Game Night");
    assert_eq!(event.date, "2025-06-14");
    assert_eq!(event.time, "19:00");
}

#[tokio::test]
async fn test_garbage_dates_never_leak() {
    let server = MockServer::start().await;
    serve_html(
        &server,
        "/broken",
        r#"<html><head><script type="application/ld+json">
            {"@type":"Event","name":"Broken Dates","startDate":"2025-13-45T99:00:00Z"}
        </script></head><body><time>Someday soon</time></body></html>"#
            .to_string(),
    )
    .await;

    let event = importer(&server).import("https://lu.ma/broken").await.unwrap();

    assert_eq!(event.title, "Broken Dates");
    assert_eq!(event.date, "");
    assert_eq!(event.time, "");
}

#[tokio::test]
async fn test_repeated_import_is_identical() {
    let server = MockServer::start().await;
    serve_html(&server, "/ai-salon", fixture("luma_event.html")).await;

    let importer = importer(&server);
    let first = importer.import("https://lu.ma/ai-salon").await.unwrap();
    let second = importer.import("https://lu.ma/ai-salon").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        server.received_requests().await.unwrap_or_default().len(),
        2
    );
}

#[tokio::test]
async fn test_concurrent_imports_are_independent() {
    let server = MockServer::start().await;
    serve_html(&server, "/ai-salon", fixture("luma_event.html")).await;
    serve_html(
        &server,
        "/e/jazz-brunch-tickets-880000000001",
        fixture("eventbrite_event.html"),
    )
    .await;

    let importer = importer(&server);
    let (luma, eventbrite) = tokio::join!(
        importer.import("https://lu.ma/ai-salon"),
        importer.import("https://www.eventbrite.com/e/jazz-brunch-tickets-880000000001"),
    );

    assert_eq!(luma.unwrap().title, "AI Salon");
    assert_eq!(eventbrite.unwrap().title, "Jazz Brunch");
}

#[tokio::test]
async fn test_description_limit_from_config() {
    let server = MockServer::start().await;
    let long = "word ".repeat(200);
    serve_html(
        &server,
        "/long",
        format!(
            r#"<html><head><script type="application/ld+json">{{"@type":"Event","description":"{}"}}</script></head></html>"#,
            long
        ),
    )
    .await;

    let importer = Importer::with_fetcher(
        MockPlatformFetcher::new(&server.uri(), 5),
        ExtractionConfig {
            description_max_chars: 20,
            ..Default::default()
        },
    );
    let event = importer.import("https://lu.ma/long").await.unwrap();

    assert_eq!(event.description, "word word word word");
    assert_eq!(event.title, "Untitled Event");
}
