//! Feeds and feed-follow subscriptions.

mod repository;
mod service;
mod types;

pub use repository::{FeedFollowRepository, FeedRepository};
pub use service::{FeedService, SubscriptionService};
pub use types::{Feed, FeedFollow, FeedFollowWithNames, FeedWithCreator};
