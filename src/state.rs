//! Shared application state.

use crate::config::ConfigStore;
use crate::db::Database;

/// State constructed once at process start and passed by reference to every
/// command handler. There is no global; everything a handler touches flows
/// through here.
#[derive(Debug)]
pub struct AppState {
    /// Relational store handle.
    pub db: Database,
    /// Preference store handle.
    pub config: ConfigStore,
}

impl AppState {
    /// Create a new state from its parts.
    pub fn new(db: Database, config: ConfigStore) -> Self {
        Self { db, config }
    }
}
