//! Feed and subscription services for feedtrack.
//!
//! `FeedService` owns feed registration and listing; `SubscriptionService`
//! owns follow/unfollow by URL. Both detect their invariants locally and
//! return typed errors; neither retries.

use tracing::info;

use super::repository::{FeedFollowRepository, FeedRepository};
use super::types::{Feed, FeedFollowWithNames, FeedWithCreator};
use crate::db::Database;
use crate::users::User;
use crate::{FeedtrackError, Result};

/// Service for feed operations.
pub struct FeedService<'a> {
    db: &'a Database,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a feed owned by `creator` and subscribe them to it.
    ///
    /// Fails with `DuplicateFeedUrl` if a feed with that URL exists. The
    /// feed row and the creator's subscription are written as one unit; a
    /// failure of either write leaves no orphaned feed behind.
    pub async fn create_feed(&self, creator: &User, name: &str, url: &str) -> Result<Feed> {
        let repo = FeedRepository::new(self.db.pool());

        if repo.get_by_url(url).await?.is_some() {
            return Err(FeedtrackError::DuplicateFeedUrl(url.to_string()));
        }

        let (feed, _follow) = repo.create_with_follow(name, url, creator.id).await?;

        info!("Created feed {} ({})", feed.name, feed.url);
        Ok(feed)
    }

    /// List all feeds joined with their creator's display name.
    pub async fn list_feeds(&self) -> Result<Vec<FeedWithCreator>> {
        FeedRepository::new(self.db.pool()).list_with_creators().await
    }
}

/// Service for follow/unfollow operations.
pub struct SubscriptionService<'a> {
    db: &'a Database,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Subscribe `user` to the feed registered under `url`.
    ///
    /// Fails with `FeedNotFound` if no feed has that URL and with
    /// `AlreadyFollowing` if the subscription already exists.
    pub async fn follow(&self, user: &User, url: &str) -> Result<FeedFollowWithNames> {
        let feed = FeedRepository::new(self.db.pool())
            .get_by_url(url)
            .await?
            .ok_or_else(|| FeedtrackError::FeedNotFound(url.to_string()))?;

        let follows = FeedFollowRepository::new(self.db.pool());
        if follows.exists(user.id, feed.id).await? {
            return Err(FeedtrackError::AlreadyFollowing(feed.name));
        }

        let follow = follows.create(user.id, feed.id).await?;
        info!("{} now follows {}", follow.user_name, follow.feed_name);
        Ok(follow)
    }

    /// Remove `user`'s subscription to the feed registered under `url`.
    ///
    /// Fails with `FeedNotFound` if no feed has that URL. Removing a
    /// subscription that does not exist is a no-op success.
    pub async fn unfollow(&self, user: &User, url: &str) -> Result<()> {
        let feed = FeedRepository::new(self.db.pool())
            .get_by_url(url)
            .await?
            .ok_or_else(|| FeedtrackError::FeedNotFound(url.to_string()))?;

        let deleted = FeedFollowRepository::new(self.db.pool())
            .delete_for_user(user.id, feed.id)
            .await?;
        if deleted > 0 {
            info!("{} unfollowed {}", user.name, feed.name);
        }
        Ok(())
    }

    /// List the feeds `user` follows, joined with display names.
    pub async fn list_follows(&self, user: &User) -> Result<Vec<FeedFollowWithNames>> {
        FeedFollowRepository::new(self.db.pool())
            .list_for_user(user.id)
            .await
    }
}
