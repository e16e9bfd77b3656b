//! Feed fetcher for feedtrack.
//!
//! Issues exactly one bounded HTTP GET per call and decodes the response
//! into a [`FeedDocument`]. No retry, no backoff, no caching; callers decide
//! whether to try again.

use std::time::Duration;

use feed_rs::parser;
use reqwest::Client;

use crate::rss::types::{FeedDocument, FeedItem, MAX_FEED_SIZE};
use crate::{FeedtrackError, Result};

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// User agent string identifying the client.
const USER_AGENT: &str = "feedtrack/1.0 (RSS Reader)";

/// Feed fetcher wrapping a reusable HTTP client.
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    /// Create a new fetcher with default settings.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedtrackError::Fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch and decode the feed at `url`, bounded by `deadline`.
    ///
    /// The deadline covers the whole request including the body read, so a
    /// hung remote cannot block the process indefinitely.
    pub async fn fetch(&self, url: &str, deadline: Duration) -> Result<FeedDocument> {
        validate_url(url)?;

        let response = self
            .client
            .get(url)
            .timeout(deadline)
            .send()
            .await
            .map_err(|e| FeedtrackError::Fetch(format!("failed to fetch feed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FeedtrackError::Fetch(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > MAX_FEED_SIZE {
                return Err(FeedtrackError::Fetch(format!(
                    "feed too large: {} bytes (max {} bytes)",
                    content_length, MAX_FEED_SIZE
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FeedtrackError::Fetch(format!("failed to read response: {}", e)))?;

        if bytes.len() as u64 > MAX_FEED_SIZE {
            return Err(FeedtrackError::Fetch(format!(
                "feed too large: {} bytes (max {} bytes)",
                bytes.len(),
                MAX_FEED_SIZE
            )));
        }

        parse_document(&bytes)
    }
}

/// Fetch and decode the feed at `url` (standalone convenience function).
pub async fn fetch_feed(url: &str, deadline: Duration) -> Result<FeedDocument> {
    FeedFetcher::new()?.fetch(url, deadline).await
}

/// Validate that `url` is an http(s) URL with a host.
fn validate_url(url: &str) -> Result<()> {
    let parsed =
        url::Url::parse(url).map_err(|e| FeedtrackError::Fetch(format!("invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(FeedtrackError::Fetch(format!(
                "unsupported URL scheme: {}",
                scheme
            )));
        }
    }

    if parsed.host().is_none() {
        return Err(FeedtrackError::Fetch("URL has no host".to_string()));
    }

    Ok(())
}

/// Parse feed bytes into a FeedDocument.
fn parse_document(bytes: &[u8]) -> Result<FeedDocument> {
    let feed = parser::parse(bytes)
        .map_err(|e| FeedtrackError::Parse(format!("failed to parse feed: {}", e)))?;

    let title = decode_entities(
        &feed
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| "Untitled Feed".to_string()),
    );
    let link = feed.links.first().map(|l| l.href.clone());
    let description = feed.description.map(|d| strip_html(&d.content));

    let items: Vec<FeedItem> = feed
        .entries
        .into_iter()
        .map(|entry| {
            let item_title = decode_entities(
                &entry
                    .title
                    .map(|t| t.content)
                    .unwrap_or_else(|| "Untitled".to_string()),
            );
            let link = entry.links.first().map(|l| l.href.clone());
            let description = entry
                .summary
                .map(|t| t.content)
                .or(entry.content.and_then(|c| c.body))
                .map(|d| strip_html(&d));
            let published_at = entry.published.or(entry.updated);

            FeedItem {
                title: item_title,
                link,
                description,
                published_at,
            }
        })
        .collect();

    Ok(FeedDocument {
        title,
        link,
        description,
        items,
    })
}

/// Decode HTML character references to their literal characters.
fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_entity = false;
    let mut entity = String::new();

    for ch in text.chars() {
        match ch {
            '&' => {
                if in_entity {
                    // Previous ampersand did not start an entity
                    result.push('&');
                    result.push_str(&entity);
                }
                in_entity = true;
                entity.clear();
            }
            ';' if in_entity => {
                in_entity = false;
                match entity.as_str() {
                    "amp" => result.push('&'),
                    "lt" => result.push('<'),
                    "gt" => result.push('>'),
                    "quot" => result.push('"'),
                    "apos" => result.push('\''),
                    "nbsp" => result.push(' '),
                    _ if entity.starts_with('#') => {
                        if let Some(code) = parse_numeric_entity(&entity) {
                            if let Some(c) = char::from_u32(code) {
                                result.push(c);
                            }
                        }
                    }
                    _ => {
                        // Unknown entity, keep as-is
                        result.push('&');
                        result.push_str(&entity);
                        result.push(';');
                    }
                }
            }
            _ if in_entity => {
                entity.push(ch);
            }
            _ => {
                result.push(ch);
            }
        }
    }

    if in_entity {
        result.push('&');
        result.push_str(&entity);
    }

    result
}

/// Strip HTML tags and decode character references.
fn strip_html(html: &str) -> String {
    let mut without_tags = String::with_capacity(html.len());
    let mut in_tag = false;

    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => without_tags.push(ch),
            _ => {}
        }
    }

    let decoded = decode_entities(&without_tags);

    // Clean up whitespace
    let decoded: String = decoded.split_whitespace().collect::<Vec<&str>>().join(" ");
    decoded.trim().to_string()
}

/// Parse a numeric HTML entity (e.g., "#123" or "#x7B").
fn parse_numeric_entity(entity: &str) -> Option<u32> {
    if entity.starts_with("#x") || entity.starts_with("#X") {
        // Hexadecimal
        u32::from_str_radix(&entity[2..], 16).ok()
    } else if entity.starts_with('#') {
        // Decimal
        entity[1..].parse().ok()
    } else {
        None
    }
}
