//! Wallet and strategy selection state.
//!
//! Owns everything the user mutates before submitting: which wallets are
//! checked (and which are disabled by the active-only filter), which
//! strategies are checked, and the parameter panels of checked strategies.
//! Submission is allowed only when at least one wallet and one strategy are
//! checked.

use serde::Serialize;

use super::id::WalletId;
use super::params::{ParameterPanel, ParameterPanels};
use super::request::{ExecutionMode, ExecutionRequest};
use super::strategy::StrategyKind;
use super::wallet::Wallet;
use crate::error::{SelectionError, ValidationError};

/// A wallet row in the selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletToggle {
    wallet: Wallet,
    checked: bool,
    disabled: bool,
}

impl WalletToggle {
    #[must_use]
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// A strategy row in the selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyToggle {
    strategy: StrategyKind,
    checked: bool,
}

impl StrategyToggle {
    #[must_use]
    pub fn strategy(&self) -> &StrategyKind {
        &self.strategy
    }

    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }
}

/// Live selection state for one orchestration flow.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    wallets: Vec<WalletToggle>,
    strategies: Vec<StrategyToggle>,
    active_only: bool,
    panels: ParameterPanels,
}

impl SelectionState {
    /// Build state from the wallet roster and the registered strategies.
    /// Everything starts unchecked; duplicate entries are dropped.
    #[must_use]
    pub fn new(wallets: Vec<Wallet>, strategies: Vec<StrategyKind>) -> Self {
        let mut state = Self::default();
        for wallet in wallets {
            if state.wallets.iter().any(|w| w.wallet.id() == wallet.id()) {
                continue;
            }
            state.wallets.push(WalletToggle {
                wallet,
                checked: false,
                disabled: false,
            });
        }
        for strategy in strategies {
            if state.strategies.iter().any(|s| s.strategy == strategy) {
                continue;
            }
            state.strategies.push(StrategyToggle {
                strategy,
                checked: false,
            });
        }
        state
    }

    #[must_use]
    pub fn wallets(&self) -> &[WalletToggle] {
        &self.wallets
    }

    #[must_use]
    pub fn strategies(&self) -> &[StrategyToggle] {
        &self.strategies
    }

    #[must_use]
    pub const fn active_only(&self) -> bool {
        self.active_only
    }

    /// Check every wallet, or only active ones when `active_only` is set.
    /// Checked wallets are enabled.
    pub fn select_all(&mut self, active_only: bool) {
        for toggle in &mut self.wallets {
            if active_only && !toggle.wallet.is_active() {
                continue;
            }
            toggle.checked = true;
            toggle.disabled = false;
        }
    }

    /// Uncheck every wallet.
    pub fn deselect_all(&mut self) {
        for toggle in &mut self.wallets {
            toggle.checked = false;
        }
    }

    /// Turn the active-only filter on or off.
    ///
    /// On: inactive wallets are unchecked and disabled, active ones enabled.
    /// Off: every wallet is enabled; previously forced-off wallets stay
    /// unchecked.
    pub fn toggle_active_only_filter(&mut self, enabled: bool) {
        self.active_only = enabled;
        for toggle in &mut self.wallets {
            if enabled && !toggle.wallet.is_active() {
                toggle.checked = false;
                toggle.disabled = true;
            } else {
                toggle.disabled = false;
            }
        }
    }

    /// Check or uncheck a single wallet.
    ///
    /// # Errors
    ///
    /// Fails for unknown wallets and for wallets disabled by the filter.
    pub fn set_wallet(&mut self, id: WalletId, checked: bool) -> Result<(), SelectionError> {
        let toggle = self
            .wallets
            .iter_mut()
            .find(|w| w.wallet.id() == id)
            .ok_or(SelectionError::UnknownWallet(id))?;
        if toggle.disabled {
            return Err(SelectionError::WalletDisabled(id));
        }
        toggle.checked = checked;
        Ok(())
    }

    /// Check or uncheck a strategy, opening or closing its parameter panel.
    ///
    /// # Errors
    ///
    /// Fails for strategies that are not registered.
    pub fn set_strategy(
        &mut self,
        strategy: &StrategyKind,
        checked: bool,
    ) -> Result<(), SelectionError> {
        let toggle = self
            .strategies
            .iter_mut()
            .find(|s| &s.strategy == strategy)
            .ok_or_else(|| SelectionError::UnknownStrategy(strategy.clone()))?;
        toggle.checked = checked;
        if checked {
            self.panels.open(strategy);
        } else {
            self.panels.close(strategy);
        }
        Ok(())
    }

    /// Set a parameter on the panel of a checked strategy.
    ///
    /// # Errors
    ///
    /// See [`ParameterPanels::set`].
    pub fn set_param(
        &mut self,
        strategy: &StrategyKind,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), SelectionError> {
        self.panels.set(strategy, name, value)
    }

    #[must_use]
    pub fn panel(&self, strategy: &StrategyKind) -> Option<&ParameterPanel> {
        self.panels.get(strategy)
    }

    #[must_use]
    pub fn selected_wallet_ids(&self) -> Vec<WalletId> {
        self.wallets
            .iter()
            .filter(|w| w.checked)
            .map(|w| w.wallet.id())
            .collect()
    }

    #[must_use]
    pub fn selected_strategies(&self) -> Vec<StrategyKind> {
        self.strategies
            .iter()
            .filter(|s| s.checked)
            .map(|s| s.strategy.clone())
            .collect()
    }

    #[must_use]
    pub fn selected_wallet_count(&self) -> usize {
        self.wallets.iter().filter(|w| w.checked).count()
    }

    #[must_use]
    pub fn selected_strategy_count(&self) -> usize {
        self.strategies.iter().filter(|s| s.checked).count()
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.selected_wallet_count() > 0 && self.selected_strategy_count() > 0
    }

    /// Check the submit preconditions, wallets first.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.selected_wallet_count() == 0 {
            return Err(ValidationError::NoWalletsSelected);
        }
        if self.selected_strategy_count() == 0 {
            return Err(ValidationError::NoStrategiesSelected);
        }
        Ok(())
    }

    /// Snapshot the selection into an immutable request.
    ///
    /// # Errors
    ///
    /// See [`Self::validate`].
    pub fn build_request(&self, mode: ExecutionMode) -> Result<ExecutionRequest, ValidationError> {
        self.validate()?;
        let strategies = self.selected_strategies();
        let params = self.panels.collect(&strategies);
        Ok(ExecutionRequest::new(
            self.selected_wallet_ids(),
            strategies,
            mode,
            params,
        ))
    }
}
