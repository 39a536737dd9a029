//! Builders for domain values used across tests.

use rust_decimal::Decimal;

use crate::core::domain::{
    ExecutionResult, SelectionState, StrategyKind, StrategyOutcome, Wallet, WalletId,
    WalletResult,
};

/// A wallet with a 42-character address derived from `id`.
pub fn wallet(id: u64, chain: &str, active: bool) -> Wallet {
    Wallet::new(WalletId::new(id), address(id), chain, active)
}

/// Deterministic hex-looking address for wallet `id`.
pub fn address(id: u64) -> String {
    format!("0x{id:040x}")
}

/// Three wallets: 1 and 3 active, 2 inactive.
pub fn roster() -> Vec<Wallet> {
    vec![
        wallet(1, "ethereum", true),
        wallet(2, "polygon", false),
        wallet(3, "arbitrum", true),
    ]
}

/// Selection over [`roster`] and the four known strategies, nothing checked.
pub fn selection() -> SelectionState {
    SelectionState::new(roster(), StrategyKind::KNOWN.to_vec())
}

/// A successful result where every wallet ran `strategy` for `profit`.
pub fn completed(strategy: StrategyKind, wallets: &[(&str, Decimal)]) -> ExecutionResult {
    let results: Vec<WalletResult> = wallets
        .iter()
        .map(|(address, profit)| {
            WalletResult::new(*address, "ethereum", *profit)
                .with_outcome(StrategyOutcome::succeeded(strategy.clone(), *profit))
        })
        .collect();
    let total = results.iter().map(|w| w.profit).sum();
    ExecutionResult::completed(total, results)
}
