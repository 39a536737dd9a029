//! Wire types for the backend's read endpoints.
//!
//! The batch endpoint's body maps straight onto
//! [`ExecutionResult`](crate::core::domain::ExecutionResult).

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::domain::{Wallet, WalletId};

/// `GET /api/wallets` body.
#[derive(Debug, Deserialize)]
pub struct WalletsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub wallets: Vec<WalletDto>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One roster entry. Extra fields (`native_balance`, `last_updated`, `is_contract`) are ignored.
#[derive(Debug, Deserialize)]
pub struct WalletDto {
    pub id: u64,
    pub address: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub usd_balance: Option<Decimal>,
}

const fn default_active() -> bool {
    true
}

impl From<WalletDto> for Wallet {
    fn from(dto: WalletDto) -> Self {
        let wallet = Wallet::new(WalletId::new(dto.id), dto.address, dto.chain, dto.is_active);
        match dto.usd_balance {
            Some(balance) => wallet.with_usd_balance(balance),
            None => wallet,
        }
    }
}
