//! User service for feedtrack.
//!
//! Registration, login, listing and the development-time reset. Login state
//! lives in the preference store; the relational store owns the rows.

use tracing::info;

use super::repository::UserRepository;
use super::types::{User, UserEntry};
use crate::config::ConfigStore;
use crate::db::Database;
use crate::{FeedtrackError, Result};

/// Service for user operations.
pub struct UserService<'a> {
    db: &'a Database,
}

impl<'a> UserService<'a> {
    /// Create a new UserService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a new user and log in as them.
    ///
    /// Fails with `UserAlreadyExists` if the name is taken. Success is
    /// reported only after the preference file records the new user.
    pub async fn register(&self, store: &mut ConfigStore, name: &str) -> Result<User> {
        let repo = UserRepository::new(self.db.pool());

        if repo.get_by_name(name).await?.is_some() {
            return Err(FeedtrackError::UserAlreadyExists(name.to_string()));
        }

        let user = repo.create(name).await?;
        store.set_current_user(&user.name)?;

        info!("Registered user {}", user.name);
        Ok(user)
    }

    /// Log in as an existing user.
    ///
    /// Fails with `UserNotFound` if no such user exists. Does not mutate the
    /// user row.
    pub async fn login(&self, store: &mut ConfigStore, name: &str) -> Result<User> {
        let repo = UserRepository::new(self.db.pool());

        let user = repo
            .get_by_name(name)
            .await?
            .ok_or_else(|| FeedtrackError::UserNotFound(name.to_string()))?;

        store.set_current_user(&user.name)?;

        info!("Logged in as {}", user.name);
        Ok(user)
    }

    /// List all users, marking the one the preference store names.
    pub async fn list_users(&self, store: &ConfigStore) -> Result<Vec<UserEntry>> {
        let repo = UserRepository::new(self.db.pool());
        let current = store.current_user_name();

        let entries = repo
            .list()
            .await?
            .into_iter()
            .map(|user| UserEntry {
                is_current: user.name == current,
                user,
            })
            .collect();

        Ok(entries)
    }

    /// Delete all users and, by cascade, all feeds and subscriptions.
    ///
    /// Irreversible; intended for development and test use.
    pub async fn reset(&self) -> Result<u64> {
        let deleted = UserRepository::new(self.db.pool()).delete_all().await?;
        info!("Reset complete, {} users deleted", deleted);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> (Database, ConfigStore, tempfile::TempDir) {
        let db = Database::open_in_memory().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::open_at(dir.path().join("prefs.json")).unwrap();
        (db, store, dir)
    }

    #[tokio::test]
    async fn test_register_sets_current_user() {
        let (db, mut store, _dir) = setup().await;
        let service = UserService::new(&db);

        let user = service.register(&mut store, "alice").await.unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(store.current_user_name(), "alice");
    }

    #[tokio::test]
    async fn test_register_duplicate_fails_and_count_unchanged() {
        let (db, mut store, _dir) = setup().await;
        let service = UserService::new(&db);

        service.register(&mut store, "alice").await.unwrap();
        let result = service.register(&mut store, "alice").await;
        assert!(matches!(
            result,
            Err(FeedtrackError::UserAlreadyExists(name)) if name == "alice"
        ));

        let count = UserRepository::new(db.pool()).count().await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_login_unknown_user_leaves_preference_unchanged() {
        let (db, mut store, _dir) = setup().await;
        let service = UserService::new(&db);

        service.register(&mut store, "alice").await.unwrap();

        let result = service.login(&mut store, "ghost").await;
        assert!(matches!(
            result,
            Err(FeedtrackError::UserNotFound(name)) if name == "ghost"
        ));
        assert_eq!(store.current_user_name(), "alice");
    }

    #[tokio::test]
    async fn test_login_switches_current_user() {
        let (db, mut store, _dir) = setup().await;
        let service = UserService::new(&db);

        service.register(&mut store, "alice").await.unwrap();
        service.register(&mut store, "bob").await.unwrap();

        service.login(&mut store, "alice").await.unwrap();
        assert_eq!(store.current_user_name(), "alice");
    }

    #[tokio::test]
    async fn test_list_users_marks_current() {
        let (db, mut store, _dir) = setup().await;
        let service = UserService::new(&db);

        service.register(&mut store, "bob").await.unwrap();
        service.register(&mut store, "alice").await.unwrap();

        let entries = service.list_users(&store).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].user.name, "alice");
        assert!(entries[0].is_current);
        assert_eq!(entries[1].user.name, "bob");
        assert!(!entries[1].is_current);
    }

    #[tokio::test]
    async fn test_reset_deletes_all_users() {
        let (db, mut store, _dir) = setup().await;
        let service = UserService::new(&db);

        service.register(&mut store, "alice").await.unwrap();
        service.register(&mut store, "bob").await.unwrap();

        let deleted = service.reset().await.unwrap();
        assert_eq!(deleted, 2);
        assert!(service.list_users(&store).await.unwrap().is_empty());
    }
}
