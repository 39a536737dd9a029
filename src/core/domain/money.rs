//! Monetary representation and display helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Profit represented as a Decimal for precision.
pub type Profit = Decimal;

/// Round to cents the way the dashboard always has (half away from zero).
#[must_use]
pub fn to_cents(value: Profit) -> Profit {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a profit as `$12.50`. Negative values render as `$-3.00`.
#[must_use]
pub fn format_usd(value: Profit) -> String {
    format!("${:.2}", to_cents(value))
}

/// A profit counts as profitable only when strictly positive.
#[must_use]
pub fn is_profitable(value: Profit) -> bool {
    to_cents(value) > Decimal::ZERO
}
