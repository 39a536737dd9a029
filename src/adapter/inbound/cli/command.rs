//! Command-line interface definitions.
//!
//! Defines the CLI structure for stratagem using `clap`: submitting a batch,
//! browsing the wallet roster and strategy registry, and checking config.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::core::domain::{ExecutionMode, StrategyKind, WalletId};

/// Fan trading strategies out across wallets and summarize the outcome
#[derive(Parser, Debug)]
#[command(name = "stratagem")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file (defaults apply when it is missing)
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the stratagem CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit one strategy batch and print the summary
    Run(Box<RunArgs>),

    /// List the backend's wallet roster
    Wallets,

    /// Explore registered strategies and their parameters
    #[command(subcommand)]
    Strategies(StrategyCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `stratagem strategies`.
#[derive(Subcommand, Debug)]
pub enum StrategyCommand {
    /// List registered strategies.
    List,
    /// Show the parameter panel of one strategy.
    Show {
        /// Strategy tag (e.g. "multi_hop", "flash-loan").
        tag: String,
    },
}

/// Subcommands for `stratagem check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and credentials.
    Config,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Wallet id to include (repeatable)
    #[arg(long = "wallet", value_name = "ID")]
    pub wallets: Vec<WalletId>,

    /// Include every eligible wallet
    #[arg(long, conflicts_with = "wallets")]
    pub all_wallets: bool,

    /// Exclude inactive wallets
    #[arg(long)]
    pub active_only: bool,

    /// Strategy tag to run (repeatable)
    #[arg(long = "strategy", value_name = "TAG")]
    pub strategies: Vec<StrategyKind>,

    /// Strategy parameter override (repeatable)
    #[arg(long = "param", value_name = "STRATEGY.NAME=VALUE")]
    pub params: Vec<ParamAssignment>,

    /// Execution mode hint [sequential, parallel]
    #[arg(long)]
    pub mode: Option<ExecutionMode>,

    /// Pick wallets, strategies, and parameters with prompts
    #[arg(short, long, conflicts_with_all = ["wallets", "all_wallets", "strategies", "params"])]
    pub interactive: bool,
}

/// A `strategy.name=value` parameter override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamAssignment {
    pub strategy: StrategyKind,
    pub name: String,
    pub value: String,
}

impl FromStr for ParamAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected STRATEGY.NAME=VALUE, got '{s}'"))?;
        let (strategy, name) = key
            .split_once('.')
            .ok_or_else(|| format!("expected STRATEGY.NAME before '=', got '{key}'"))?;
        let name = name.trim();
        if strategy.trim().is_empty() || name.is_empty() {
            return Err(format!("expected STRATEGY.NAME=VALUE, got '{s}'"));
        }
        Ok(Self {
            strategy: StrategyKind::from_tag(strategy),
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}
