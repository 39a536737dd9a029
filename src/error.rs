use thiserror::Error;

use crate::core::domain::{StrategyKind, WalletId};
use crate::core::service::orchestrator::{RunEvent, RunPhase};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Submission preconditions. Raised before anything is dispatched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select at least one wallet")]
    NoWalletsSelected,

    #[error("Please select at least one strategy")]
    NoStrategiesSelected,
}

/// Rejected interactions with the selection state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown wallet {0}")]
    UnknownWallet(WalletId),

    #[error("wallet {0} is disabled while the active-only filter is on")]
    WalletDisabled(WalletId),

    #[error("strategy {0} is not registered")]
    UnknownStrategy(StrategyKind),

    #[error("strategy {0} is not selected")]
    StrategyNotSelected(StrategyKind),

    #[error("strategy {strategy} has no parameter named {name}")]
    UnknownParameter { strategy: StrategyKind, name: String },

    #[error("invalid value '{value}' for {strategy}.{name}: {reason}")]
    InvalidParameter {
        strategy: StrategyKind,
        name: String,
        value: String,
        reason: String,
    },
}

/// Failures at the response boundary of the batch call.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response (status {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    #[error("{0}")]
    Other(String),
}

/// Orchestration run misuse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("cannot apply {event:?} while {from:?}")]
    InvalidTransition { from: RunPhase, event: RunEvent },

    #[error("an orchestration run is already in flight")]
    RunInFlight,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::Http(err))
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
