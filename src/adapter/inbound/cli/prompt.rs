//! Interactive selection for `stratagem run --interactive`.

use std::str::FromStr;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use rust_decimal::Decimal;

use crate::core::domain::{
    format_usd, ExecutionMode, FieldKind, ParamField, SelectionState, StrategyKind,
};
use crate::error::Result;

const MODES: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

/// Walk the operator through wallets, strategies, parameters, and mode.
///
/// # Errors
///
/// Terminal I/O failures and rejected selections.
pub fn fill(selection: &mut SelectionState, default_mode: ExecutionMode) -> Result<ExecutionMode> {
    let theme = ColorfulTheme::default();

    let active_only = Confirm::with_theme(&theme)
        .with_prompt("Only show active wallets?")
        .default(false)
        .interact()?;
    selection.toggle_active_only_filter(active_only);

    let eligible: Vec<_> = selection
        .wallets()
        .iter()
        .filter(|toggle| !toggle.is_disabled())
        .map(|toggle| toggle.wallet().clone())
        .collect();
    let labels: Vec<String> = eligible
        .iter()
        .map(|wallet| {
            let balance = wallet
                .usd_balance()
                .map(format_usd)
                .unwrap_or_else(|| "-".to_string());
            let status = if wallet.is_active() { "" } else { " [inactive]" };
            format!(
                "{} ({}) {}{}",
                wallet.short_address(),
                wallet.chain(),
                balance,
                status
            )
        })
        .collect();
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Wallets (space to toggle)")
        .items(&labels)
        .interact()?;
    for index in picked {
        selection.set_wallet(eligible[index].id(), true)?;
    }

    let registry: Vec<StrategyKind> = selection
        .strategies()
        .iter()
        .map(|toggle| toggle.strategy().clone())
        .collect();
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Strategies (space to toggle)")
        .items(&registry)
        .interact()?;
    for index in picked {
        let strategy = &registry[index];
        selection.set_strategy(strategy, true)?;
        prompt_panel(&theme, selection, strategy)?;
    }

    let mode = Select::with_theme(&theme)
        .with_prompt("Execution mode")
        .items(&MODES)
        .default(mode_index(default_mode))
        .interact()?;

    Ok(MODES[mode])
}

fn prompt_panel(
    theme: &ColorfulTheme,
    selection: &mut SelectionState,
    strategy: &StrategyKind,
) -> Result<()> {
    let Some(panel) = selection.panel(strategy) else {
        return Ok(());
    };
    let fields: Vec<ParamField> = panel.schema().fields.to_vec();
    if fields.is_empty() {
        return Ok(());
    }
    println!("  {}", panel.schema().title);

    for field in fields {
        let value = match field.kind {
            FieldKind::Select { options } => {
                let labels: Vec<&str> = options.iter().map(|o| o.label).collect();
                let default = options
                    .iter()
                    .position(|o| o.value == field.default)
                    .unwrap_or(0);
                let index = Select::with_theme(theme)
                    .with_prompt(field.label)
                    .items(&labels)
                    .default(default)
                    .interact()?;
                options[index].value.to_string()
            }
            FieldKind::Number => Input::<String>::with_theme(theme)
                .with_prompt(field.label)
                .default(field.default.to_string())
                .validate_with(|input: &String| -> std::result::Result<(), String> {
                    Decimal::from_str(input.trim())
                        .map(|_| ())
                        .map_err(|_| "enter a number".to_string())
                })
                .interact_text()?,
        };
        selection.set_param(strategy, field.name, value)?;
    }
    Ok(())
}

fn mode_index(mode: ExecutionMode) -> usize {
    MODES.iter().position(|m| *m == mode).unwrap_or(1)
}
