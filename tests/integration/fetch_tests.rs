//! HttpFetcher behaviour against mock servers

use crate::support::test_fetcher_config;
use event_import::importer::HttpFetcher;
use event_import::ImportError;
use std::time::{Duration, Instant};
use url::Url;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(timeout_secs: u64) -> HttpFetcher {
    HttpFetcher::new(&test_fetcher_config(timeout_secs)).expect("Failed to build fetcher")
}

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).expect("Failed to parse URL")
}

#[tokio::test]
async fn test_fetch_html_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>Hi</title></head></html>",
            "text/html; charset=utf-8",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher(5)
        .fetch_page(&url(&server, "/events/1"))
        .await
        .expect("Fetch should succeed");

    assert_eq!(page.status, 200);
    assert_eq!(page.final_url, url(&server, "/events/1").to_string());
    assert_eq!(
        page.content_type.as_deref(),
        Some("text/html; charset=utf-8")
    );
    assert!(page.body.contains("<title>Hi</title>"));
}

#[tokio::test]
async fn test_fetch_sends_browser_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    fetcher(5)
        .fetch_page(&url(&server, "/e"))
        .await
        .expect("Request should carry browser headers");
}

#[tokio::test]
async fn test_fetch_404_is_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetcher(5)
        .fetch_page(&url(&server, "/e/missing"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::FetchFailed { status: 404, .. }));
}

#[tokio::test]
async fn test_fetch_server_error_is_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetcher(5)
        .fetch_page(&url(&server, "/e"))
        .await
        .unwrap_err();

    // Exactly one request: no retries
    assert!(matches!(err, ImportError::FetchFailed { status: 503, .. }));
}

#[tokio::test]
async fn test_fetch_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html></html>", "text/html")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let started = Instant::now();
    let err = fetcher(1)
        .fetch_page(&url(&server, "/slow"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::FetchTimeout { seconds: 1, .. }));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_fetch_non_html_is_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a":1}"#, "application/json"))
        .mount(&server)
        .await;

    let err = fetcher(5)
        .fetch_page(&url(&server, "/api"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::ParseFailure { .. }));
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let server = MockServer::start().await;
    let location = format!("{}/new", server.uri());
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", location.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>moved</html>", "text/html"))
        .mount(&server)
        .await;

    let page = fetcher(5)
        .fetch_page(&url(&server, "/old"))
        .await
        .expect("Redirect should be followed");

    assert_eq!(page.final_url, url(&server, "/new").to_string());
    assert!(page.body.contains("moved"));
}

#[tokio::test]
async fn test_fetch_redirect_limit_is_network_error() {
    let server = MockServer::start().await;
    let location = format!("{}/loop", server.uri());
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", location.as_str()))
        .mount(&server)
        .await;

    let err = fetcher(5)
        .fetch_page(&url(&server, "/loop"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::NetworkError { .. }));
}

#[tokio::test]
async fn test_fetch_connection_refused_is_network_error() {
    // Reserve a port, then free it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read address");
    drop(listener);

    let target = Url::parse(&format!("http://{}/e", addr)).unwrap();
    let err = fetcher(5).fetch_page(&target).await.unwrap_err();

    assert!(matches!(err, ImportError::NetworkError { .. }));
}
