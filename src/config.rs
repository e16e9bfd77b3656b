//! Preference store for feedtrack.
//!
//! A small JSON blob under the user's home directory holding the database
//! connection string and the name of the currently logged-in user. It is
//! read once at process start and rewritten wholesale (never merged)
//! whenever the current user changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{FeedtrackError, Result};

/// Preference file name under the home directory.
const CONFIG_FILE_NAME: &str = ".feedtrack.json";

/// User preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection string. Opaque to everything but the store.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// Name of the logged-in user. Empty means logged out.
    #[serde(default)]
    pub current_user_name: String,
}

#[cfg(feature = "sqlite")]
fn default_db_url() -> String {
    match dirs::home_dir() {
        Some(home) => format!("sqlite://{}", home.join(".feedtrack.db").display()),
        None => "sqlite://feedtrack.db".to_string(),
    }
}

#[cfg(feature = "postgres")]
fn default_db_url() -> String {
    "postgres://localhost/feedtrack".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_url: default_db_url(),
            current_user_name: String::new(),
        }
    }
}

impl Config {
    /// Path of the preference file under the user's home directory.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FeedtrackError::Config("home directory not found".to_string()))?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load preferences from an explicit path.
    ///
    /// A missing file yields the default configuration; a file that exists
    /// but cannot be read or decoded is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .map_err(|e| FeedtrackError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&data)
            .map_err(|e| FeedtrackError::Config(format!("cannot decode {}: {}", path.display(), e)))
    }

    /// Write the whole preference file to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| FeedtrackError::Config(format!("cannot encode config: {}", e)))?;
        std::fs::write(path, data)
            .map_err(|e| FeedtrackError::Config(format!("cannot write {}: {}", path.display(), e)))
    }

    /// Whether a user is currently logged in.
    pub fn is_logged_in(&self) -> bool {
        !self.current_user_name.is_empty()
    }
}

/// Handle on the preference file: values plus the path they came from, so
/// updates rewrite the same file they were read from.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    /// Open the store at the default path.
    pub fn open() -> Result<Self> {
        Self::open_at(Config::default_path()?)
    }

    /// Open the store at an explicit path (used by tests).
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = Config::load_from(&path)?;
        Ok(Self { path, config })
    }

    /// Current preference values.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the logged-in user. Empty means logged out.
    pub fn current_user_name(&self) -> &str {
        &self.config.current_user_name
    }

    /// Database connection string.
    pub fn db_url(&self) -> &str {
        &self.config.db_url
    }

    /// Record `name` as the current user and rewrite the file.
    ///
    /// The in-memory value changes only after the write succeeds, so a
    /// failed write never reports a login that was not persisted.
    pub fn set_current_user(&mut self, name: &str) -> Result<()> {
        let mut updated = self.config.clone();
        updated.current_user_name = name.to_string();
        updated.save_to(&self.path)?;
        self.config = updated;
        Ok(())
    }
}
