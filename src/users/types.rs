//! User types for feedtrack.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    /// User ID.
    pub id: Uuid,
    /// Unique display name.
    pub name: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A user annotated for listing.
#[derive(Debug, Clone)]
pub struct UserEntry {
    /// The user.
    pub user: User,
    /// Whether this user is the one recorded in the preference store.
    pub is_current: bool,
}
