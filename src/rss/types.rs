//! Feed document types for feedtrack.

use chrono::{DateTime, Utc};

/// Maximum feed size in bytes (5MB).
pub const MAX_FEED_SIZE: u64 = 5 * 1024 * 1024;

/// A fetched and decoded feed: channel metadata plus items.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    /// Channel title, with HTML character references decoded.
    pub title: String,
    /// Channel link.
    pub link: Option<String>,
    /// Channel description.
    pub description: Option<String>,
    /// Decoded items.
    pub items: Vec<FeedItem>,
}

/// A single item of a feed document.
#[derive(Debug, Clone)]
pub struct FeedItem {
    /// Item title, with HTML character references decoded.
    pub title: String,
    /// Link to the original article.
    pub link: Option<String>,
    /// Item description or summary, with HTML tags stripped.
    pub description: Option<String>,
    /// When the item was published.
    pub published_at: Option<DateTime<Utc>>,
}
