//! Per-strategy parameter panels.
//!
//! Every selected strategy gets a panel whose fields come from a static
//! schema keyed by the strategy tag. Values stay strings all the way to the
//! wire; the backend does the numeric parsing. Closing a panel (unchecking
//! its strategy) discards its values, so re-checking starts from defaults.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use super::strategy::StrategyKind;
use crate::error::SelectionError;

/// Parameter values keyed by strategy, then by field name.
pub type StrategyParameters = BTreeMap<StrategyKind, BTreeMap<String, String>>;

/// One choice of a select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

/// Input widget for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Select { options: &'static [SelectOption] },
    Number,
}

/// A single named parameter with its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
}

impl ParamField {
    /// Check a candidate value against this field.
    fn check(&self, value: &str) -> Result<(), String> {
        match self.kind {
            FieldKind::Select { options } => {
                if options.iter().any(|o| o.value == value) {
                    Ok(())
                } else {
                    let allowed: Vec<_> = options.iter().map(|o| o.value).collect();
                    Err(format!("expected one of {}", allowed.join(", ")))
                }
            }
            FieldKind::Number => Decimal::from_str(value.trim())
                .map(|_| ())
                .map_err(|_| "expected a number".to_string()),
        }
    }
}

const TOKENS_FLASH: &[SelectOption] = &[
    opt("DAI", "DAI"),
    opt("USDC", "USDC"),
    opt("USDT", "USDT"),
    opt("ETH", "ETH"),
    opt("WBTC", "WBTC"),
];

const DEX_FIRST: &[SelectOption] = &[
    opt("uniswap", "Uniswap"),
    opt("sushiswap", "Sushiswap"),
    opt("pancakeswap", "PancakeSwap"),
];

const DEX_SECOND: &[SelectOption] = &[
    opt("sushiswap", "Sushiswap"),
    opt("uniswap", "Uniswap"),
    opt("pancakeswap", "PancakeSwap"),
];

const MAX_HOPS: &[SelectOption] = &[
    opt("2", "2 Hops"),
    opt("3", "3 Hops"),
    opt("4", "4 Hops"),
    opt("5", "5 Hops"),
];

const TARGET_CHAINS: &[SelectOption] = &[
    opt("ethereum", "Ethereum"),
    opt("binance", "Binance Smart Chain"),
    opt("polygon", "Polygon"),
    opt("avalanche", "Avalanche"),
    opt("arbitrum", "Arbitrum"),
];

const TOKENS_BRIDGE: &[SelectOption] = &[
    opt("USDC", "USDC"),
    opt("USDT", "USDT"),
    opt("DAI", "DAI"),
    opt("ETH", "ETH"),
];

const PROTOCOLS: &[SelectOption] = &[
    opt("aave", "Aave"),
    opt("compound", "Compound"),
    opt("curve", "Curve"),
    opt("yearn", "Yearn"),
];

const POOLS: &[SelectOption] = &[
    opt("usdc", "USDC"),
    opt("eth", "ETH"),
    opt("dai", "DAI"),
    opt("wbtc", "WBTC"),
];

const NO_FIELDS: &[ParamField] = &[];

const FLASH_LOAN_FIELDS: &[ParamField] = &[
    ParamField {
        name: "token",
        label: "Token",
        kind: FieldKind::Select { options: TOKENS_FLASH },
        default: "DAI",
    },
    ParamField {
        name: "amount",
        label: "Amount",
        kind: FieldKind::Number,
        default: "1000000",
    },
    ParamField {
        name: "dex1",
        label: "DEX Pair (buy)",
        kind: FieldKind::Select { options: DEX_FIRST },
        default: "uniswap",
    },
    ParamField {
        name: "dex2",
        label: "DEX Pair (sell)",
        kind: FieldKind::Select { options: DEX_SECOND },
        default: "sushiswap",
    },
];

const MULTI_HOP_FIELDS: &[ParamField] = &[
    ParamField {
        name: "amount",
        label: "Initial Amount",
        kind: FieldKind::Number,
        default: "10000",
    },
    ParamField {
        name: "max_hops",
        label: "Max Hops",
        kind: FieldKind::Select { options: MAX_HOPS },
        default: "3",
    },
    ParamField {
        name: "min_profit",
        label: "Min Profit (%)",
        kind: FieldKind::Number,
        default: "0.5",
    },
];

const CROSS_CHAIN_FIELDS: &[ParamField] = &[
    ParamField {
        name: "target_chain",
        label: "Target Chain",
        kind: FieldKind::Select { options: TARGET_CHAINS },
        default: "ethereum",
    },
    ParamField {
        name: "token",
        label: "Token",
        kind: FieldKind::Select { options: TOKENS_BRIDGE },
        default: "USDC",
    },
    ParamField {
        name: "amount",
        label: "Amount",
        kind: FieldKind::Number,
        default: "10000",
    },
    ParamField {
        name: "min_profit",
        label: "Min Profit (%)",
        kind: FieldKind::Number,
        default: "0.5",
    },
];

const YIELD_FARMING_FIELDS: &[ParamField] = &[
    ParamField {
        name: "protocol",
        label: "Protocol",
        kind: FieldKind::Select { options: PROTOCOLS },
        default: "aave",
    },
    ParamField {
        name: "pool",
        label: "Pool",
        kind: FieldKind::Select { options: POOLS },
        default: "usdc",
    },
    ParamField {
        name: "amount",
        label: "Amount",
        kind: FieldKind::Number,
        default: "10000",
    },
    ParamField {
        name: "duration",
        label: "Duration (days)",
        kind: FieldKind::Number,
        default: "30",
    },
];

/// The form shown for one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSchema {
    pub strategy: StrategyKind,
    pub title: String,
    pub fields: &'static [ParamField],
}

impl ParamSchema {
    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static ParamField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Default values for every field.
    #[must_use]
    pub fn defaults(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), f.default.to_string()))
            .collect()
    }
}

/// Build the parameter schema for a strategy tag. Pure; unknown tags get a
/// schema with no fields.
#[must_use]
pub fn schema_for(strategy: &StrategyKind) -> ParamSchema {
    let (title, fields) = match strategy {
        StrategyKind::FlashLoan => ("Flash Loan Parameters".to_string(), FLASH_LOAN_FIELDS),
        StrategyKind::MultiHop => (
            "Multi-Hop Arbitrage Parameters".to_string(),
            MULTI_HOP_FIELDS,
        ),
        StrategyKind::CrossChain => (
            "Cross-Chain Arbitrage Parameters".to_string(),
            CROSS_CHAIN_FIELDS,
        ),
        StrategyKind::YieldFarming => {
            ("Yield Farming Parameters".to_string(), YIELD_FARMING_FIELDS)
        }
        StrategyKind::Other(tag) => (
            format!("{} Parameters", tag.replacen('_', " ", 1)),
            NO_FIELDS,
        ),
    };

    ParamSchema {
        strategy: strategy.clone(),
        title,
        fields,
    }
}

/// An open panel: schema plus the current values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterPanel {
    schema: ParamSchema,
    values: BTreeMap<String, String>,
}

impl ParameterPanel {
    fn open(strategy: &StrategyKind) -> Self {
        let schema = schema_for(strategy);
        let values = schema.defaults();
        Self { schema, values }
    }

    #[must_use]
    pub fn schema(&self) -> &ParamSchema {
        &self.schema
    }

    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// The set of open panels, one per checked strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPanels {
    panels: BTreeMap<StrategyKind, ParameterPanel>,
}

impl ParameterPanels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a panel with default values. An already open panel is untouched.
    pub fn open(&mut self, strategy: &StrategyKind) {
        self.panels
            .entry(strategy.clone())
            .or_insert_with(|| ParameterPanel::open(strategy));
    }

    /// Remove a panel and forget its values.
    pub fn close(&mut self, strategy: &StrategyKind) {
        self.panels.remove(strategy);
    }

    #[must_use]
    pub fn get(&self, strategy: &StrategyKind) -> Option<&ParameterPanel> {
        self.panels.get(strategy)
    }

    /// Set a field value on an open panel.
    ///
    /// # Errors
    ///
    /// Fails when the panel is not open, the field does not exist in the
    /// schema, or the value is not acceptable for the field.
    pub fn set(
        &mut self,
        strategy: &StrategyKind,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), SelectionError> {
        let panel = self
            .panels
            .get_mut(strategy)
            .ok_or_else(|| SelectionError::StrategyNotSelected(strategy.clone()))?;
        let field = panel
            .schema
            .field(name)
            .ok_or_else(|| SelectionError::UnknownParameter {
                strategy: strategy.clone(),
                name: name.to_string(),
            })?;

        let value = value.into();
        field
            .check(&value)
            .map_err(|reason| SelectionError::InvalidParameter {
                strategy: strategy.clone(),
                name: name.to_string(),
                value: value.clone(),
                reason,
            })?;

        panel.values.insert(name.to_string(), value.trim().to_string());
        Ok(())
    }

    /// Collect values for the given strategies, in order. Strategies without
    /// an open panel are skipped.
    #[must_use]
    pub fn collect(&self, strategies: &[StrategyKind]) -> StrategyParameters {
        strategies
            .iter()
            .filter_map(|s| self.panels.get(s).map(|p| (s.clone(), p.values.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_schemas_have_expected_fields() {
        let names = |kind: StrategyKind| -> Vec<&'static str> {
            schema_for(&kind).fields.iter().map(|f| f.name).collect()
        };

        assert_eq!(
            names(StrategyKind::FlashLoan),
            vec!["token", "amount", "dex1", "dex2"]
        );
        assert_eq!(
            names(StrategyKind::MultiHop),
            vec!["amount", "max_hops", "min_profit"]
        );
        assert_eq!(
            names(StrategyKind::CrossChain),
            vec!["target_chain", "token", "amount", "min_profit"]
        );
        assert_eq!(
            names(StrategyKind::YieldFarming),
            vec!["protocol", "pool", "amount", "duration"]
        );
    }

    #[test]
    fn unknown_strategy_gets_empty_schema() {
        let schema = schema_for(&StrategyKind::from_tag("liquidity_snipe_v2"));
        assert!(schema.fields.is_empty());
        assert_eq!(schema.title, "liquidity snipe_v2 Parameters");
    }

    #[test]
    fn unknown_title_uses_registered_spelling() {
        let schema = schema_for(&StrategyKind::from_tag("Liquidation-Sniper"));
        assert_eq!(schema.title, "Liquidation-Sniper Parameters");
    }

    #[test]
    fn open_panel_starts_from_defaults() {
        let mut panels = ParameterPanels::new();
        panels.open(&StrategyKind::MultiHop);

        let panel = panels.get(&StrategyKind::MultiHop).unwrap();
        assert_eq!(panel.value("amount"), Some("10000"));
        assert_eq!(panel.value("max_hops"), Some("3"));
        assert_eq!(panel.value("min_profit"), Some("0.5"));
    }

    #[test]
    fn reopening_an_open_panel_keeps_values() {
        let mut panels = ParameterPanels::new();
        panels.open(&StrategyKind::FlashLoan);
        panels.set(&StrategyKind::FlashLoan, "token", "USDC").unwrap();
        panels.open(&StrategyKind::FlashLoan);

        let panel = panels.get(&StrategyKind::FlashLoan).unwrap();
        assert_eq!(panel.value("token"), Some("USDC"));
    }

    #[test]
    fn closing_a_panel_resets_values() {
        let mut panels = ParameterPanels::new();
        panels.open(&StrategyKind::FlashLoan);
        panels.set(&StrategyKind::FlashLoan, "amount", "5000").unwrap();
        panels.close(&StrategyKind::FlashLoan);
        panels.open(&StrategyKind::FlashLoan);

        let panel = panels.get(&StrategyKind::FlashLoan).unwrap();
        assert_eq!(panel.value("amount"), Some("1000000"));
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut panels = ParameterPanels::new();
        panels.open(&StrategyKind::YieldFarming);

        assert!(matches!(
            panels.set(&StrategyKind::YieldFarming, "protocol", "maker"),
            Err(SelectionError::InvalidParameter { .. })
        ));
        assert!(matches!(
            panels.set(&StrategyKind::YieldFarming, "duration", "thirty"),
            Err(SelectionError::InvalidParameter { .. })
        ));
        assert!(matches!(
            panels.set(&StrategyKind::YieldFarming, "leverage", "2"),
            Err(SelectionError::UnknownParameter { .. })
        ));
        assert!(matches!(
            panels.set(&StrategyKind::MultiHop, "amount", "1"),
            Err(SelectionError::StrategyNotSelected(StrategyKind::MultiHop))
        ));
    }

    #[test]
    fn collect_includes_only_requested_open_panels() {
        let mut panels = ParameterPanels::new();
        let other = StrategyKind::from_tag("stat_arb");
        panels.open(&StrategyKind::CrossChain);
        panels.open(&other);

        let params = panels.collect(&[
            StrategyKind::CrossChain,
            other.clone(),
            StrategyKind::FlashLoan,
        ]);

        assert_eq!(params.len(), 2);
        assert_eq!(params[&StrategyKind::CrossChain]["target_chain"], "ethereum");
        assert!(params[&other].is_empty());
        assert!(!params.contains_key(&StrategyKind::FlashLoan));
    }
}
