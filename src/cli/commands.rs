//! Command kinds and their handlers.
//!
//! Each CLI command is one enum variant; dispatch is a match, not a
//! string-keyed table. Handlers print to stdout and surface errors to the
//! caller, which owns the exit code.

use std::time::Duration;

use clap::Subcommand;

use super::auth::authenticated;
use crate::feeds::{FeedService, SubscriptionService};
use crate::rss::{fetch_feed, FeedDocument};
use crate::state::AppState;
use crate::users::{User, UserService};
use crate::Result;

/// Demo feed fetched by `agg`.
const DEMO_FEED_URL: &str = "https://www.wagslane.dev/index.xml";

/// Deadline for a single feed fetch.
const FETCH_DEADLINE: Duration = Duration::from_secs(30);

/// All commands the tracker understands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a user and log in as them
    Register {
        /// Display name for the new user
        name: String,
    },
    /// Log in as an existing user
    Login {
        /// Name of the user to log in as
        name: String,
    },
    /// Delete all users, feeds and subscriptions
    Reset,
    /// List users, marking the current one
    Users,
    /// Fetch and print one feed document
    Agg,
    /// Register a feed as the current user and subscribe to it
    Addfeed {
        /// Display name for the feed
        name: String,
        /// Feed URL
        url: String,
    },
    /// List all feeds with their creators
    Feeds,
    /// Subscribe the current user to a feed by URL
    Follow {
        /// URL of a registered feed
        url: String,
    },
    /// List the current user's subscriptions
    Following,
    /// Remove the current user's subscription by URL
    Unfollow {
        /// URL of a registered feed
        url: String,
    },
}

impl Commands {
    /// Invoke the handler bound to this command.
    pub async fn execute(&self, state: &mut AppState) -> Result<()> {
        match self {
            Commands::Register { name } => register(state, name).await,
            Commands::Login { name } => login(state, name).await,
            Commands::Reset => reset(state).await,
            Commands::Users => users(state).await,
            Commands::Agg => agg().await,
            Commands::Addfeed { name, url } => {
                let state = &*state;
                authenticated(state, |user| addfeed(state, user, name, url)).await
            }
            Commands::Feeds => feeds(state).await,
            Commands::Follow { url } => {
                let state = &*state;
                authenticated(state, |user| follow(state, user, url)).await
            }
            Commands::Following => {
                let state = &*state;
                authenticated(state, |user| following(state, user)).await
            }
            Commands::Unfollow { url } => {
                let state = &*state;
                authenticated(state, |user| unfollow(state, user, url)).await
            }
        }
    }
}

async fn register(state: &mut AppState, name: &str) -> Result<()> {
    let user = UserService::new(&state.db)
        .register(&mut state.config, name)
        .await?;
    println!("User {} created and logged in", user.name);
    Ok(())
}

async fn login(state: &mut AppState, name: &str) -> Result<()> {
    let user = UserService::new(&state.db)
        .login(&mut state.config, name)
        .await?;
    println!("Logged in as {}", user.name);
    Ok(())
}

async fn reset(state: &AppState) -> Result<()> {
    let deleted = UserService::new(&state.db).reset().await?;
    println!("Database reset, {} users deleted", deleted);
    Ok(())
}

async fn users(state: &AppState) -> Result<()> {
    let entries = UserService::new(&state.db).list_users(&state.config).await?;
    for entry in entries {
        if entry.is_current {
            println!("* {} (current)", entry.user.name);
        } else {
            println!("* {}", entry.user.name);
        }
    }
    Ok(())
}

async fn agg() -> Result<()> {
    let document = fetch_feed(DEMO_FEED_URL, FETCH_DEADLINE).await?;
    print_document(&document);
    Ok(())
}

fn print_document(document: &FeedDocument) {
    println!("{}", document.title);
    if let Some(link) = &document.link {
        println!("{}", link);
    }
    if let Some(description) = &document.description {
        println!("{}", description);
    }
    for item in &document.items {
        println!();
        println!("- {}", item.title);
        if let Some(published_at) = item.published_at {
            println!("  {}", published_at.to_rfc2822());
        }
        if let Some(link) = &item.link {
            println!("  {}", link);
        }
        if let Some(description) = &item.description {
            println!("  {}", description);
        }
    }
}

async fn addfeed(state: &AppState, user: User, name: &str, url: &str) -> Result<()> {
    let feed = FeedService::new(&state.db)
        .create_feed(&user, name, url)
        .await?;
    println!("Feed {} ({}) created, {} is following it", feed.name, feed.url, user.name);
    Ok(())
}

async fn feeds(state: &AppState) -> Result<()> {
    let feeds = FeedService::new(&state.db).list_feeds().await?;
    for entry in feeds {
        println!("* {} ({}) by {}", entry.feed.name, entry.feed.url, entry.creator_name);
    }
    Ok(())
}

async fn follow(state: &AppState, user: User, url: &str) -> Result<()> {
    let follow = SubscriptionService::new(&state.db).follow(&user, url).await?;
    println!("{} is now following {}", follow.user_name, follow.feed_name);
    Ok(())
}

async fn following(state: &AppState, user: User) -> Result<()> {
    let follows = SubscriptionService::new(&state.db).list_follows(&user).await?;
    for follow in follows {
        println!("* {}", follow.feed_name);
    }
    Ok(())
}

async fn unfollow(state: &AppState, user: User, url: &str) -> Result<()> {
    SubscriptionService::new(&state.db).unfollow(&user, url).await?;
    println!("{} unfollowed {}", user.name, url);
    Ok(())
}
