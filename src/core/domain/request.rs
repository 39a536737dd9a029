//! The batch execution request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::WalletId;
use super::params::StrategyParameters;
use super::strategy::StrategyKind;

/// How the backend should walk the wallet x strategy matrix.
///
/// Only a hint; nothing client-side depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    #[default]
    Parallel,
}

impl ExecutionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            other => Err(format!("unknown execution mode '{other}'")),
        }
    }
}

/// One immutable batch submission. Fields are private so a request cannot
/// be altered after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    wallet_ids: Vec<WalletId>,
    strategy_types: Vec<StrategyKind>,
    execution_mode: ExecutionMode,
    strategy_params: StrategyParameters,
}

impl ExecutionRequest {
    #[must_use]
    pub fn new(
        wallet_ids: Vec<WalletId>,
        strategy_types: Vec<StrategyKind>,
        execution_mode: ExecutionMode,
        strategy_params: StrategyParameters,
    ) -> Self {
        Self {
            wallet_ids,
            strategy_types,
            execution_mode,
            strategy_params,
        }
    }

    #[must_use]
    pub fn wallet_ids(&self) -> &[WalletId] {
        &self.wallet_ids
    }

    #[must_use]
    pub fn strategy_types(&self) -> &[StrategyKind] {
        &self.strategy_types
    }

    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.execution_mode
    }

    #[must_use]
    pub fn strategy_params(&self) -> &StrategyParameters {
        &self.strategy_params
    }
}
