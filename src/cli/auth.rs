//! Authentication middleware for commands that act as a user.
//!
//! This is the only place current-user resolution happens; handlers never
//! read the preference store directly.

use std::future::Future;

use crate::state::AppState;
use crate::users::{User, UserRepository};
use crate::{FeedtrackError, Result};

/// Resolve the user named by the preference store.
///
/// Fails with `NotLoggedIn` when no name is recorded and with
/// `UserNotFound` when the recorded name no longer exists in the relational
/// store (e.g. after a reset).
pub async fn resolve_current_user(state: &AppState) -> Result<User> {
    let name = state.config.current_user_name();
    if name.is_empty() {
        return Err(FeedtrackError::NotLoggedIn);
    }

    UserRepository::new(state.db.pool())
        .get_by_name(name)
        .await?
        .ok_or_else(|| FeedtrackError::UserNotFound(name.to_string()))
}

/// Wrap a handler that needs a resolved user.
///
/// Resolves the current user first and fails closed without invoking the
/// inner handler when resolution fails.
pub async fn authenticated<F, Fut>(state: &AppState, handler: F) -> Result<()>
where
    F: FnOnce(User) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let user = resolve_current_user(state).await?;
    handler(user).await
}
