//! `stratagem wallets`: the backend's wallet roster.

use std::path::Path;

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::adapter::outbound::http::HttpBackend;
use crate::core::domain::{format_usd, Wallet};
use crate::error::Result;
use crate::port::outbound::backend::StrategyBackend;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Chain")]
    chain: String,
    #[tabled(rename = "USD")]
    balance: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&Wallet> for WalletRow {
    fn from(wallet: &Wallet) -> Self {
        Self {
            id: wallet.id().get(),
            address: wallet.short_address(),
            chain: wallet.chain().to_string(),
            balance: wallet
                .usd_balance()
                .map(format_usd)
                .unwrap_or_else(|| "-".to_string()),
            status: if wallet.is_active() {
                "active"
            } else {
                "inactive"
            },
        }
    }
}

/// Roster table, or `None` when there are no wallets.
#[must_use]
pub fn roster_table(wallets: &[Wallet]) -> Option<String> {
    if wallets.is_empty() {
        return None;
    }
    let mut table = Table::new(wallets.iter().map(WalletRow::from));
    table.with(Style::rounded());
    Some(table.to_string())
}

/// Execute the `wallets` command.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let backend = HttpBackend::from_config(&config.api);

    let spinner = output::spinner("Fetching wallets...");
    let wallets = match backend.list_wallets().await {
        Ok(wallets) => {
            spinner.finish_and_clear();
            wallets
        }
        Err(err) => {
            output::spinner_fail(&spinner, "Failed to fetch wallets");
            return Err(err.into());
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "wallets",
            "wallets": wallets,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Wallets");
    match roster_table(&wallets) {
        Some(table) => output::lines(&table),
        None => output::note("No wallets found"),
    }
    let active = wallets.iter().filter(|w| w.is_active()).count();
    output::field("Active", format!("{active} of {}", wallets.len()));

    Ok(())
}
