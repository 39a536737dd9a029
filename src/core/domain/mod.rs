//! Core domain types for stratagem.
//!
//! ## Selection
//!
//! - [`Wallet`] - A wallet from the backend roster
//! - [`SelectionState`] - Checked wallets, checked strategies, active-only filter
//! - [`ParameterPanels`] / [`ParamSchema`] - Per-strategy parameter forms
//!
//! ## Execution
//!
//! - [`ExecutionRequest`] - Immutable batch submission
//! - [`ExecutionResult`] - Backend response with per-wallet outcomes
//! - [`ExecutionLog`] - Append-only operator log for one run
//!
//! ## Presentation
//!
//! - [`SummaryView`] - Render-ready reduction of an [`ExecutionResult`]
//!
//! ## Identifier Types
//!
//! - [`WalletId`] - Backend wallet identifier
//! - [`StrategyKind`] - Strategy-type tag

mod id;
mod log;
mod money;
mod params;
mod request;
mod result;
mod selection;
mod strategy;
mod summary;
mod wallet;

pub use id::WalletId;
pub use log::{ExecutionLog, LogEntry, Severity};
pub use money::{format_usd, is_profitable, to_cents, Profit};
pub use params::{
    schema_for, FieldKind, ParamField, ParamSchema, ParameterPanel, ParameterPanels,
    SelectOption, StrategyParameters,
};
pub use request::{ExecutionMode, ExecutionRequest};
pub use result::{ExecutionResult, StrategyOutcome, WalletResult};
pub use selection::{SelectionState, StrategyToggle, WalletToggle};
pub use strategy::StrategyKind;
pub use summary::{
    summarize, ResultsView, StrategyRow, SummaryView, WalletCard, CANCELLED_NOTICE,
    NO_STRATEGIES_MESSAGE, NO_WALLETS_MESSAGE, PENDING_MESSAGE,
};
pub use wallet::{truncate_address, Wallet};
