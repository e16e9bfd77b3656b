//! Fetcher tests against a local one-shot HTTP server.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use feedtrack::{fetch_feed, FeedtrackError};

/// Serve one HTTP response on a random local port and return its base URL.
async fn serve_once(body: &'static str, status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        // Drain the request head
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf).await;

        let response = format!(
            "{status_line}\r\nContent-Type: application/rss+xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
    });

    format!("http://{}/feed.xml", addr)
}

const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Tom &amp; Jerry</title>
    <link>https://example.com</link>
    <description>Cartoon news</description>
    <item>
      <title>Episode One</title>
      <link>https://example.com/1</link>
      <description>The first one</description>
      <pubDate>Mon, 02 Jan 2006 15:04:05 GMT</pubDate>
    </item>
    <item>
      <title>Episode Two</title>
      <link>https://example.com/2</link>
      <description>The second one</description>
    </item>
  </channel>
</rss>"#;

#[tokio::test]
async fn fetch_decodes_channel_and_items() {
    let url = serve_once(FEED_BODY, "HTTP/1.1 200 OK").await;

    let doc = fetch_feed(&url, Duration::from_secs(5)).await.unwrap();
    assert_eq!(doc.title, "Tom & Jerry");
    assert_eq!(doc.description, Some("Cartoon news".to_string()));
    assert_eq!(doc.items.len(), 2);
    assert_eq!(doc.items[0].title, "Episode One");
    assert_eq!(doc.items[0].link, Some("https://example.com/1".to_string()));
    assert!(doc.items[0].published_at.is_some());
    assert_eq!(doc.items[1].title, "Episode Two");
    assert!(doc.items[1].published_at.is_none());
}

#[tokio::test]
async fn fetch_fails_on_http_error_status() {
    let url = serve_once("gone", "HTTP/1.1 404 Not Found").await;

    let result = fetch_feed(&url, Duration::from_secs(5)).await;
    assert!(matches!(result, Err(FeedtrackError::Fetch(_))));
}

#[tokio::test]
async fn fetch_fails_on_undecodable_body() {
    let url = serve_once("this is not a feed", "HTTP/1.1 200 OK").await;

    let result = fetch_feed(&url, Duration::from_secs(5)).await;
    assert!(matches!(result, Err(FeedtrackError::Parse(_))));
}

#[tokio::test]
async fn fetch_honors_the_deadline() {
    // Accept the connection but never answer
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    let url = format!("http://{}/feed.xml", addr);
    let start = std::time::Instant::now();
    let result = fetch_feed(&url, Duration::from_millis(200)).await;
    assert!(matches!(result, Err(FeedtrackError::Fetch(_))));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn fetch_rejects_non_http_urls() {
    let result = fetch_feed("ftp://example.com/feed.xml", Duration::from_secs(1)).await;
    assert!(matches!(result, Err(FeedtrackError::Fetch(_))));
}
