//! Terminal rendering of run summaries.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::core::domain::{
    ResultsView, SummaryView, WalletCard, NO_STRATEGIES_MESSAGE, NO_WALLETS_MESSAGE,
    PENDING_MESSAGE,
};

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Strategy")]
    strategy: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Result")]
    detail: String,
}

/// Print the summary area.
pub fn summary(view: &SummaryView) {
    output::section("Execution Summary");
    match view {
        SummaryView::Pending => output::note(PENDING_MESSAGE),
        SummaryView::Failure { message } => output::error(message),
        SummaryView::Cancelled { notice } => output::warning(notice),
        SummaryView::Results(results) => render_results(results),
    }
}

fn render_results(results: &ResultsView) {
    let total = if results.profitable {
        output::positive(&results.total_label)
    } else {
        output::negative(&results.total_label)
    };
    output::field("Total profit", total);

    if results.wallets.is_empty() {
        output::note(NO_WALLETS_MESSAGE);
        return;
    }

    for card in &results.wallets {
        render_card(card);
    }
}

fn render_card(card: &WalletCard) {
    let profit = if card.profitable {
        output::positive(&card.profit_label)
    } else {
        output::negative(&card.profit_label)
    };
    output::section(&format!(
        "{} {}  {}",
        card.short_address,
        output::muted(format!("({})", card.chain)),
        profit
    ));
    if let Some(note) = &card.note {
        output::warning(note);
    }

    match strategy_table(card) {
        Some(table) => output::lines(&table),
        None => output::note(NO_STRATEGIES_MESSAGE),
    }
}

/// Outcome table for one wallet, `None` when it ran no strategies.
#[must_use]
pub fn strategy_table(card: &WalletCard) -> Option<String> {
    if card.strategies.is_empty() {
        return None;
    }

    let rows = card.strategies.iter().map(|row| OutcomeRow {
        strategy: row.strategy.to_string(),
        status: if row.success {
            output::positive("success")
        } else {
            output::negative("failed")
        },
        detail: row.detail.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    Some(table.to_string())
}
