//! Feed and subscription types for feedtrack.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered feed.
#[derive(Debug, Clone)]
pub struct Feed {
    /// Feed ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Feed URL. Unique across all feeds.
    pub url: String,
    /// User who registered the feed.
    pub user_id: Uuid,
    /// When the feed was created.
    pub created_at: DateTime<Utc>,
    /// When the feed was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A feed joined with its creator's display name, for listing.
#[derive(Debug, Clone)]
pub struct FeedWithCreator {
    /// The feed.
    pub feed: Feed,
    /// Display name of the user who registered it.
    pub creator_name: String,
}

/// A subscription linking a user to a feed.
///
/// The (user, feed) pair is unique; a user cannot follow the same feed
/// twice.
#[derive(Debug, Clone)]
pub struct FeedFollow {
    /// Subscription ID.
    pub id: Uuid,
    /// Subscribing user.
    pub user_id: Uuid,
    /// Followed feed.
    pub feed_id: Uuid,
    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
    /// When the subscription was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A subscription joined with the feed and user display names.
#[derive(Debug, Clone)]
pub struct FeedFollowWithNames {
    /// The subscription.
    pub follow: FeedFollow,
    /// Display name of the followed feed.
    pub feed_name: String,
    /// Display name of the subscribing user.
    pub user_name: String,
}
