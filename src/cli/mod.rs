//! Command-line surface: name→command resolution and dispatch.

mod auth;
mod commands;

pub use auth::{authenticated, resolve_current_user};
pub use commands::Commands;

use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

use crate::{FeedtrackError, Result};

/// Command-line RSS feed tracker.
#[derive(Debug, Parser)]
#[command(name = "feedtrack", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolve raw arguments into a typed command.
    ///
    /// An unrecognized command name fails with `UnknownCommand`; missing or
    /// malformed positional arguments fail with `Argument`. `--help` and
    /// `--version` print and exit successfully.
    pub fn parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(err)
                if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
            {
                err.exit()
            }
            Err(err) => Err(map_parse_error(err)),
        }
    }
}

/// Map a clap parse failure onto the command error taxonomy.
fn map_parse_error(err: clap::Error) -> FeedtrackError {
    match err.kind() {
        ErrorKind::InvalidSubcommand => {
            let name = err
                .get(ContextKind::InvalidSubcommand)
                .and_then(|v| match v {
                    ContextValue::String(s) => Some(s.clone()),
                    _ => None,
                })
                .unwrap_or_default();
            FeedtrackError::UnknownCommand(name)
        }
        _ => {
            // First line only; clap appends usage text
            let message = err
                .to_string()
                .lines()
                .next()
                .unwrap_or("invalid arguments")
                .to_string();
            FeedtrackError::Argument(message)
        }
    }
}
