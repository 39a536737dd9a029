//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod diagnostic;
pub mod output;
pub mod prompt;
pub mod render;
pub mod run;
pub mod strategy;
pub mod wallet;

use std::path::Path;

use tracing::debug;

use command::{CheckCommand, Cli, Commands, StrategyCommand};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load configuration for a command. A missing file means defaults.
///
/// # Errors
///
/// Unreadable, malformed, or invalid configuration.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Run the parsed command and return the process exit code.
///
/// # Errors
///
/// Any command failure; the caller renders it.
pub async fn dispatch(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Run(args) => Ok(run::execute(&cli.config, args).await?.exit_code()),
        Commands::Wallets => wallet::execute(&cli.config).await.map(|()| 0),
        Commands::Strategies(StrategyCommand::List) => strategy::list(&cli.config).map(|()| 0),
        Commands::Strategies(StrategyCommand::Show { tag }) => {
            strategy::show(&cli.config, tag).map(|()| 0)
        }
        Commands::Check(CheckCommand::Config) => check::execute_config(&cli.config).map(|()| 0),
    }
}
