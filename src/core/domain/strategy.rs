//! Strategy type tags.
//!
//! The backend knows four strategies by name. Anything else is carried
//! through verbatim as [`StrategyKind::Other`] so newly registered strategies
//! can be submitted without a client release.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const FLASH_LOAN: &str = "flash_loan";
const MULTI_HOP: &str = "multi_hop";
const CROSS_CHAIN: &str = "cross_chain";
const YIELD_FARMING: &str = "yield_farming";

/// A strategy-type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    FlashLoan,
    MultiHop,
    CrossChain,
    YieldFarming,
    /// Any other registered strategy, keyed by its wire tag.
    Other(String),
}

impl StrategyKind {
    /// The strategies the backend ships with, in display order.
    pub const KNOWN: [StrategyKind; 4] = [
        StrategyKind::FlashLoan,
        StrategyKind::MultiHop,
        StrategyKind::CrossChain,
        StrategyKind::YieldFarming,
    ];

    /// Parse a wire tag.
    ///
    /// The four known tags are matched loosely (case and `-`/`_` ignored).
    /// Any other tag is kept exactly as registered, minus surrounding
    /// whitespace, because the backend matches it byte for byte.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        match normalize_tag(tag).as_str() {
            FLASH_LOAN => Self::FlashLoan,
            MULTI_HOP => Self::MultiHop,
            CROSS_CHAIN => Self::CrossChain,
            YIELD_FARMING => Self::YieldFarming,
            _ => Self::Other(tag.to_string()),
        }
    }

    /// Case- and separator-insensitive form of the tag, for duplicate checks.
    #[must_use]
    pub fn normalized(&self) -> String {
        normalize_tag(self.as_str())
    }

    /// The wire tag for this strategy.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::FlashLoan => FLASH_LOAN,
            Self::MultiHop => MULTI_HOP,
            Self::CrossChain => CROSS_CHAIN,
            Self::YieldFarming => YIELD_FARMING,
            Self::Other(tag) => tag,
        }
    }

    /// True for the four built-in strategies.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase().replace('-', "_")
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<&str> for StrategyKind {
    fn from(s: &str) -> Self {
        Self::from_tag(s)
    }
}

impl Serialize for StrategyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StrategyKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip_through_from_tag() {
        for kind in StrategyKind::KNOWN {
            assert_eq!(StrategyKind::from_tag(kind.as_str()), kind);
            assert!(kind.is_known());
        }
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let kind = StrategyKind::from_tag("liquidation_sniper");
        assert_eq!(kind, StrategyKind::Other("liquidation_sniper".into()));
        assert_eq!(kind.to_string(), "liquidation_sniper");
        assert!(!kind.is_known());
    }

    #[test]
    fn known_tags_match_loosely() {
        assert_eq!(StrategyKind::from_tag(" Multi-Hop "), StrategyKind::MultiHop);
        assert_eq!(StrategyKind::from_tag("FLASH-LOAN"), StrategyKind::FlashLoan);
    }

    #[test]
    fn unknown_tag_keeps_its_spelling() {
        let kind = StrategyKind::from_tag(" Liquidation-Sniper ");
        assert_eq!(kind, StrategyKind::Other("Liquidation-Sniper".into()));
        assert_eq!(kind.as_str(), "Liquidation-Sniper");
        assert_eq!(kind.normalized(), "liquidation_sniper");
        assert_eq!(
            serde_json::to_string(&kind).unwrap(),
            "\"Liquidation-Sniper\""
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&StrategyKind::CrossChain).unwrap();
        assert_eq!(json, "\"cross_chain\"");
        let back: StrategyKind = serde_json::from_str("\"yield_farming\"").unwrap();
        assert_eq!(back, StrategyKind::YieldFarming);
    }
}
