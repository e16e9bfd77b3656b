//! Schema migrations for feedtrack.
//!
//! Each entry is one migration; the version is the 1-based index into this
//! array. Applied versions are recorded in the `schema_version` table.

/// All migrations, in order.
pub const MIGRATIONS: &[&str] = &[
    // v1: users, feeds, feed_follows
    r#"
    CREATE TABLE users (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL UNIQUE,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );

    CREATE TABLE feeds (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        url         TEXT NOT NULL UNIQUE,
        user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );

    CREATE TABLE feed_follows (
        id          TEXT PRIMARY KEY,
        user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        feed_id     TEXT NOT NULL REFERENCES feeds(id) ON DELETE CASCADE,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL,
        UNIQUE(user_id, feed_id)
    );

    CREATE INDEX idx_feeds_user_id ON feeds(user_id);
    CREATE INDEX idx_feed_follows_user_id ON feed_follows(user_id);
    CREATE INDEX idx_feed_follows_feed_id ON feed_follows(feed_id);
    "#,
];
