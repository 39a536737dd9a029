//! Wallets known to the backend.

use rust_decimal::Decimal;
use serde::Serialize;

use super::id::WalletId;

const ADDRESS_HEAD: usize = 8;
const ADDRESS_TAIL: usize = 6;

/// A wallet as listed by the backend roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wallet {
    id: WalletId,
    address: String,
    chain: String,
    active: bool,
    usd_balance: Option<Decimal>,
}

impl Wallet {
    /// Create a wallet entry.
    pub fn new(
        id: WalletId,
        address: impl Into<String>,
        chain: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            id,
            address: address.into(),
            chain: chain.into(),
            active,
            usd_balance: None,
        }
    }

    /// Attach the estimated USD balance reported by the backend.
    #[must_use]
    pub fn with_usd_balance(mut self, balance: Decimal) -> Self {
        self.usd_balance = Some(balance);
        self
    }

    #[must_use]
    pub const fn id(&self) -> WalletId {
        self.id
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn chain(&self) -> &str {
        &self.chain
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn usd_balance(&self) -> Option<Decimal> {
        self.usd_balance
    }

    /// Address shortened for display, see [`truncate_address`].
    #[must_use]
    pub fn short_address(&self) -> String {
        truncate_address(&self.address)
    }
}

/// Shorten an address to its first 8 and last 6 characters.
///
/// The cut is always applied, so addresses of 14 characters or fewer show
/// overlapping head and tail.
#[must_use]
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars.iter().take(ADDRESS_HEAD).collect();
    let tail_start = chars.len().saturating_sub(ADDRESS_TAIL);
    let tail: String = chars[tail_start..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_full_length_address() {
        let address = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
        assert_eq!(truncate_address(address), "0x71C765...d8976F");
    }

    #[test]
    fn short_address_overlaps() {
        assert_eq!(truncate_address("0xabc...1234"), "0xabc........1234");
        assert_eq!(truncate_address("0x1"), "0x1...0x1");
        assert_eq!(truncate_address(""), "...");
    }

    #[test]
    fn wallet_accessors() {
        let wallet = Wallet::new(WalletId::new(7), "0xdeadbeefcafe00112233", "polygon", false);
        assert_eq!(wallet.id(), WalletId::new(7));
        assert_eq!(wallet.chain(), "polygon");
        assert!(!wallet.is_active());
        assert_eq!(wallet.short_address(), "0xdeadbe...112233");
        assert_eq!(wallet.usd_balance(), None);
    }
}
