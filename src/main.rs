use std::process::ExitCode;

use feedtrack::cli::Cli;
use feedtrack::{AppState, ConfigStore, Database, Result};

#[tokio::main]
async fn main() -> ExitCode {
    feedtrack::logging::init("warn");

    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConfigStore::open()?;
    let db = Database::connect(config.db_url()).await?;
    let mut state = AppState::new(db, config);
    cli.command.execute(&mut state).await
}
