//! Feed and feed-follow repositories for feedtrack.

use chrono::Utc;
use uuid::Uuid;

use super::types::{Feed, FeedFollow, FeedFollowWithNames, FeedWithCreator};
use crate::db::{parse_datetime, DbPool};
use crate::{FeedtrackError, Result};

/// Row type for a feed from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
struct FeedRow {
    id: String,
    name: String,
    url: String,
    user_id: String,
    created_at: String,
    updated_at: String,
}

impl From<FeedRow> for Feed {
    fn from(row: FeedRow) -> Self {
        Feed {
            id: Uuid::parse_str(&row.id).unwrap_or_default(),
            name: row.name,
            url: row.url,
            user_id: Uuid::parse_str(&row.user_id).unwrap_or_default(),
            created_at: parse_datetime(&row.created_at).unwrap_or_else(Utc::now),
            updated_at: parse_datetime(&row.updated_at).unwrap_or_else(Utc::now),
        }
    }
}

/// Row type for a feed joined with its creator's name.
#[derive(Debug, Clone, sqlx::FromRow)]
struct FeedWithCreatorRow {
    id: String,
    name: String,
    url: String,
    user_id: String,
    created_at: String,
    updated_at: String,
    creator_name: String,
}

impl From<FeedWithCreatorRow> for FeedWithCreator {
    fn from(row: FeedWithCreatorRow) -> Self {
        let feed = Feed {
            id: Uuid::parse_str(&row.id).unwrap_or_default(),
            name: row.name,
            url: row.url,
            user_id: Uuid::parse_str(&row.user_id).unwrap_or_default(),
            created_at: parse_datetime(&row.created_at).unwrap_or_else(Utc::now),
            updated_at: parse_datetime(&row.updated_at).unwrap_or_else(Utc::now),
        };
        FeedWithCreator {
            feed,
            creator_name: row.creator_name,
        }
    }
}

/// Row type for a feed-follow joined with display names.
#[derive(Debug, Clone, sqlx::FromRow)]
struct FeedFollowWithNamesRow {
    id: String,
    user_id: String,
    feed_id: String,
    created_at: String,
    updated_at: String,
    feed_name: String,
    user_name: String,
}

impl From<FeedFollowWithNamesRow> for FeedFollowWithNames {
    fn from(row: FeedFollowWithNamesRow) -> Self {
        let follow = FeedFollow {
            id: Uuid::parse_str(&row.id).unwrap_or_default(),
            user_id: Uuid::parse_str(&row.user_id).unwrap_or_default(),
            feed_id: Uuid::parse_str(&row.feed_id).unwrap_or_default(),
            created_at: parse_datetime(&row.created_at).unwrap_or_else(Utc::now),
            updated_at: parse_datetime(&row.updated_at).unwrap_or_else(Utc::now),
        };
        FeedFollowWithNames {
            follow,
            feed_name: row.feed_name,
            user_name: row.user_name,
        }
    }
}

/// Repository for feed operations.
pub struct FeedRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FeedRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a feed and its creator's subscription as one transaction.
    ///
    /// Either both rows persist or neither does.
    pub async fn create_with_follow(
        &self,
        name: &str,
        url: &str,
        creator_id: Uuid,
    ) -> Result<(Feed, FeedFollow)> {
        let feed = Feed {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: url.to_string(),
            user_id: creator_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let follow = FeedFollow {
            id: Uuid::new_v4(),
            user_id: creator_id,
            feed_id: feed.id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        sqlx::query(
            "INSERT INTO feeds (id, name, url, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(feed.id.to_string())
        .bind(&feed.name)
        .bind(&feed.url)
        .bind(feed.user_id.to_string())
        .bind(feed.created_at.to_rfc3339())
        .bind(feed.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        sqlx::query(
            "INSERT INTO feed_follows (id, user_id, feed_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(follow.id.to_string())
        .bind(follow.user_id.to_string())
        .bind(follow.feed_id.to_string())
        .bind(follow.created_at.to_rfc3339())
        .bind(follow.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        Ok((feed, follow))
    }

    /// Get a feed by URL.
    pub async fn get_by_url(&self, url: &str) -> Result<Option<Feed>> {
        let row = sqlx::query_as::<_, FeedRow>(
            "SELECT id, name, url, user_id, created_at, updated_at
             FROM feeds WHERE url = $1",
        )
        .bind(url)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        Ok(row.map(Feed::from))
    }

    /// List all feeds joined with creator names, in feed-name order.
    pub async fn list_with_creators(&self) -> Result<Vec<FeedWithCreator>> {
        let rows = sqlx::query_as::<_, FeedWithCreatorRow>(
            "SELECT f.id, f.name, f.url, f.user_id, f.created_at, f.updated_at,
                    u.name AS creator_name
             FROM feeds AS f
             INNER JOIN users AS u ON f.user_id = u.id
             ORDER BY f.name",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(FeedWithCreator::from).collect())
    }

    /// Count feeds registered under a URL.
    pub async fn count_by_url(&self, url: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feeds WHERE url = $1")
            .bind(url)
            .fetch_one(self.pool)
            .await
            .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        Ok(count)
    }
}

/// Repository for feed-follow operations.
pub struct FeedFollowRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FeedFollowRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a subscription for (user, feed).
    pub async fn create(&self, user_id: Uuid, feed_id: Uuid) -> Result<FeedFollowWithNames> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO feed_follows (id, user_id, feed_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(feed_id.to_string())
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(self.pool)
        .await
        .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| FeedtrackError::Database("feed follow not found".to_string()))
    }

    /// Get a subscription joined with display names.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<FeedFollowWithNames>> {
        let row = sqlx::query_as::<_, FeedFollowWithNamesRow>(
            "SELECT ff.id, ff.user_id, ff.feed_id, ff.created_at, ff.updated_at,
                    f.name AS feed_name,
                    u.name AS user_name
             FROM feed_follows AS ff
             INNER JOIN feeds AS f ON ff.feed_id = f.id
             INNER JOIN users AS u ON ff.user_id = u.id
             WHERE ff.id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        Ok(row.map(FeedFollowWithNames::from))
    }

    /// Whether a subscription exists for (user, feed).
    pub async fn exists(&self, user_id: Uuid, feed_id: Uuid) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM feed_follows WHERE user_id = $1 AND feed_id = $2",
        )
        .bind(user_id.to_string())
        .bind(feed_id.to_string())
        .fetch_one(self.pool)
        .await
        .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    /// Delete the subscription for (user, feed), if present.
    ///
    /// Returns the number of rows deleted; deleting a subscription that does
    /// not exist deletes nothing and is not an error.
    pub async fn delete_for_user(&self, user_id: Uuid, feed_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM feed_follows WHERE user_id = $1 AND feed_id = $2")
            .bind(user_id.to_string())
            .bind(feed_id.to_string())
            .execute(self.pool)
            .await
            .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// List a user's subscriptions joined with display names.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FeedFollowWithNames>> {
        let rows = sqlx::query_as::<_, FeedFollowWithNamesRow>(
            "SELECT ff.id, ff.user_id, ff.feed_id, ff.created_at, ff.updated_at,
                    f.name AS feed_name,
                    u.name AS user_name
             FROM feed_follows AS ff
             INNER JOIN feeds AS f ON ff.feed_id = f.id
             INNER JOIN users AS u ON ff.user_id = u.id
             WHERE ff.user_id = $1",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool)
        .await
        .map_err(|e| FeedtrackError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(FeedFollowWithNames::from).collect())
    }
}
