//! Feed fetching and decoding.

mod fetcher;
mod types;

pub use fetcher::{fetch_feed, FeedFetcher};
pub use types::{FeedDocument, FeedItem, MAX_FEED_SIZE};
