//! feedtrack - command-line RSS feed tracker.
//!
//! Register users, register feeds, follow them by URL, and fetch a feed
//! document on demand. One process invocation runs exactly one command.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod feeds;
pub mod logging;
pub mod rss;
pub mod state;
pub mod users;

pub use cli::{Cli, Commands};
pub use config::{Config, ConfigStore};
pub use db::Database;
pub use error::{FeedtrackError, Result};
pub use feeds::{Feed, FeedFollow, FeedFollowWithNames, FeedService, FeedWithCreator, SubscriptionService};
pub use rss::{fetch_feed, FeedDocument, FeedFetcher, FeedItem};
pub use state::AppState;
pub use users::{User, UserEntry, UserService};
