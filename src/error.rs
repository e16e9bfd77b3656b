//! Error types for feedtrack.

use thiserror::Error;

/// Common error type for feedtrack.
#[derive(Error, Debug)]
pub enum FeedtrackError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from any database
    /// backend. Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file error.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid or missing command arguments.
    #[error("argument error: {0}")]
    Argument(String),

    /// The command name did not match any registered command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command required a logged-in user but none is set.
    #[error("not logged in")]
    NotLoggedIn,

    /// User does not exist.
    #[error("user {0} not found")]
    UserNotFound(String),

    /// A user with that name already exists.
    #[error("user {0} already exists")]
    UserAlreadyExists(String),

    /// No feed is registered under that URL.
    #[error("feed {0} not found")]
    FeedNotFound(String),

    /// A feed with that URL already exists.
    #[error("a feed with url {0} already exists")]
    DuplicateFeedUrl(String),

    /// The user already follows that feed.
    #[error("already following {0}")]
    AlreadyFollowing(String),

    /// Transport or HTTP-status failure while fetching a feed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The response body could not be decoded as a feed document.
    #[error("parse error: {0}")]
    Parse(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for FeedtrackError {
    fn from(e: sqlx::Error) -> Self {
        FeedtrackError::Database(e.to_string())
    }
}

/// Result type alias for feedtrack operations.
pub type Result<T> = std::result::Result<T, FeedtrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_logged_in_display() {
        assert_eq!(FeedtrackError::NotLoggedIn.to_string(), "not logged in");
    }

    #[test]
    fn test_user_not_found_display() {
        let err = FeedtrackError::UserNotFound("ghost".to_string());
        assert_eq!(err.to_string(), "user ghost not found");
    }

    #[test]
    fn test_duplicate_feed_url_display() {
        let err = FeedtrackError::DuplicateFeedUrl("http://x/feed.xml".to_string());
        assert_eq!(
            err.to_string(),
            "a feed with url http://x/feed.xml already exists"
        );
    }

    #[test]
    fn test_unknown_command_display() {
        let err = FeedtrackError::UnknownCommand("bogus".to_string());
        assert_eq!(err.to_string(), "unknown command: bogus");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FeedtrackError = io_err.into();
        assert!(matches!(err, FeedtrackError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(FeedtrackError::NotLoggedIn)
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
