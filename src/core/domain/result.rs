//! Batch execution results as returned by the backend.
//!
//! Per-strategy failure is ordinary data here: a failed [`StrategyOutcome`]
//! sits next to successful ones and never aborts processing of the rest.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::money::Profit;
use super::strategy::StrategyKind;

const UNKNOWN_ERROR: &str = "unknown error";

/// Missing or `null` amounts count as zero.
fn zero_if_missing<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// Outcome of one strategy on one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    pub strategy: StrategyKind,
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "zero_if_missing")]
    pub profit: Profit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StrategyOutcome {
    #[must_use]
    pub fn succeeded(strategy: StrategyKind, profit: Profit) -> Self {
        Self {
            strategy,
            success: true,
            profit,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(strategy: StrategyKind, error: impl Into<String>) -> Self {
        Self {
            strategy,
            success: false,
            profit: Decimal::ZERO,
            error: Some(error.into()),
        }
    }
}

/// Results for one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletResult {
    pub address: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default, deserialize_with = "zero_if_missing")]
    pub profit: Profit,
    #[serde(default)]
    pub strategies: Vec<StrategyOutcome>,
    /// Backend diagnostic such as "All strategies failed".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Set when the backend could not process the wallet at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WalletResult {
    #[must_use]
    pub fn new(address: impl Into<String>, chain: impl Into<String>, profit: Profit) -> Self {
        Self {
            address: address.into(),
            chain: chain.into(),
            profit,
            strategies: Vec::new(),
            message: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: StrategyOutcome) -> Self {
        self.strategies.push(outcome);
        self
    }
}

/// The full response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default, deserialize_with = "zero_if_missing")]
    pub total_profit: Profit,
    #[serde(default)]
    pub wallets: Vec<WalletResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// A successful result.
    #[must_use]
    pub fn completed(total_profit: Profit, wallets: Vec<WalletResult>) -> Self {
        Self {
            success: true,
            total_profit,
            wallets,
            error: None,
        }
    }

    /// A `success:false` result carrying the backend's message.
    #[must_use]
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            total_profit: Decimal::ZERO,
            wallets: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Error message for a rejected result.
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or(UNKNOWN_ERROR)
    }
}
