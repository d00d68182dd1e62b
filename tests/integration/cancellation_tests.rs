//! A request that outlives its deadline must not leave a socket behind
//!
//! Uses a raw listener that accepts the connection, never answers, and
//! reports when the client side closes it.

use crate::support::test_fetcher_config;
use event_import::importer::HttpFetcher;
use event_import::ImportError;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

/// Accepts one connection, swallows the request, and signals on EOF
async fn silent_server() -> (Url, oneshot::Receiver<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read address");
    let (closed_tx, closed_rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut buf = [0u8; 4096];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => continue,
            }
        }
        let _ = closed_tx.send(());
    });

    let url = Url::parse(&format!("http://{}/event", addr)).expect("Failed to build URL");
    (url, closed_rx)
}

#[tokio::test]
async fn test_timed_out_request_closes_connection() {
    let (url, closed_rx) = silent_server().await;
    let fetcher = HttpFetcher::new(&test_fetcher_config(1)).expect("Failed to build fetcher");

    let started = Instant::now();
    let err = fetcher.fetch_page(&url).await.unwrap_err();

    assert!(matches!(err, ImportError::FetchTimeout { seconds: 1, .. }));
    assert!(started.elapsed() < Duration::from_secs(4));

    tokio::time::timeout(Duration::from_secs(5), closed_rx)
        .await
        .expect("Server still holds an open connection after the timeout")
        .expect("Server task ended without observing the close");
}
