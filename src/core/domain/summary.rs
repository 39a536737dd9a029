//! Reduction of an [`ExecutionResult`] into a render-ready summary.
//!
//! [`summarize`] is pure: every label the terminal (or any other renderer)
//! shows is computed here so it can be tested without a renderer.

use serde::Serialize;

use super::money::{format_usd, is_profitable, Profit};
use super::result::{ExecutionResult, StrategyOutcome, WalletResult};
use super::strategy::StrategyKind;
use super::wallet::truncate_address;

pub const PENDING_MESSAGE: &str = "Executing strategies...";
pub const CANCELLED_NOTICE: &str =
    "The operation was cancelled by the user. Some strategies may have already been executed.";
pub const NO_WALLETS_MESSAGE: &str = "No wallets processed";
pub const NO_STRATEGIES_MESSAGE: &str = "No strategies executed";
const FAILED_FALLBACK: &str = "Failed";

/// What the summary area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryView {
    /// Request in flight.
    Pending,
    Results(ResultsView),
    /// Single failure alert; no wallet cards.
    Failure { message: String },
    Cancelled { notice: String },
}

impl SummaryView {
    #[must_use]
    pub fn cancelled() -> Self {
        Self::Cancelled {
            notice: CANCELLED_NOTICE.to_string(),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Wallet cards, empty unless this is a results view.
    #[must_use]
    pub fn wallet_cards(&self) -> &[WalletCard] {
        match self {
            Self::Results(results) => &results.wallets,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub total_profit: Profit,
    pub total_label: String,
    pub profitable: bool,
    /// Empty means "no wallets processed".
    pub wallets: Vec<WalletCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletCard {
    pub address: String,
    pub short_address: String,
    pub chain: String,
    pub profit_label: String,
    pub profitable: bool,
    /// Empty means "no strategies executed".
    pub strategies: Vec<StrategyRow>,
    /// Backend diagnostic for the wallet, error first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyRow {
    pub strategy: StrategyKind,
    pub success: bool,
    /// Profit label on success, error text on failure.
    pub detail: String,
}

/// Reduce a backend result into a summary view.
#[must_use]
pub fn summarize(result: &ExecutionResult) -> SummaryView {
    if !result.success {
        return SummaryView::failure(result.error_message());
    }

    SummaryView::Results(ResultsView {
        total_profit: result.total_profit,
        total_label: format_usd(result.total_profit),
        profitable: is_profitable(result.total_profit),
        wallets: result.wallets.iter().map(wallet_card).collect(),
    })
}

fn wallet_card(wallet: &WalletResult) -> WalletCard {
    WalletCard {
        address: wallet.address.clone(),
        short_address: truncate_address(&wallet.address),
        chain: wallet.chain.clone(),
        profit_label: format_usd(wallet.profit),
        profitable: is_profitable(wallet.profit),
        strategies: wallet.strategies.iter().map(strategy_row).collect(),
        note: wallet.error.clone().or_else(|| wallet.message.clone()),
    }
}

fn strategy_row(outcome: &StrategyOutcome) -> StrategyRow {
    let detail = if outcome.success {
        format_usd(outcome.profit)
    } else {
        outcome
            .error
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| FAILED_FALLBACK.to_string())
    };

    StrategyRow {
        strategy: outcome.strategy.clone(),
        success: outcome.success,
        detail,
    }
}
