//! Selection rules and the request they produce.

use serde_json::json;
use stratagem::core::domain::{
    schema_for, ExecutionMode, FieldKind, SelectionState, StrategyKind, WalletId,
};
use stratagem::error::{SelectionError, ValidationError};
use stratagem::testkit::domain::{roster, selection};

#[test]
fn request_serializes_to_backend_wire_format() {
    let mut state = selection();
    state.set_wallet(WalletId::new(3), true).unwrap();
    state.set_wallet(WalletId::new(1), true).unwrap();
    state.set_strategy(&StrategyKind::FlashLoan, true).unwrap();
    state.set_strategy(&StrategyKind::YieldFarming, true).unwrap();
    state
        .set_param(&StrategyKind::FlashLoan, "amount", " 250000 ")
        .unwrap();
    state
        .set_param(&StrategyKind::YieldFarming, "protocol", "curve")
        .unwrap();

    let request = state.build_request(ExecutionMode::Sequential).unwrap();

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "wallet_ids": [1, 3],
            "strategy_types": ["flash_loan", "yield_farming"],
            "execution_mode": "sequential",
            "strategy_params": {
                "flash_loan": {
                    "token": "DAI",
                    "amount": "250000",
                    "dex1": "uniswap",
                    "dex2": "sushiswap"
                },
                "yield_farming": {
                    "protocol": "curve",
                    "pool": "usdc",
                    "amount": "10000",
                    "duration": "30"
                }
            }
        })
    );
}

#[test]
fn wallets_are_checked_before_strategies() {
    let state = selection();
    assert_eq!(
        state.build_request(ExecutionMode::Parallel).unwrap_err(),
        ValidationError::NoWalletsSelected
    );
    assert!(!state.can_submit());

    let mut state = selection();
    state.set_wallet(WalletId::new(1), true).unwrap();
    assert_eq!(
        state.build_request(ExecutionMode::Parallel).unwrap_err(),
        ValidationError::NoStrategiesSelected
    );
}

#[test]
fn validation_messages_match_operator_copy() {
    assert_eq!(
        ValidationError::NoWalletsSelected.to_string(),
        "Please select at least one wallet"
    );
    assert_eq!(
        ValidationError::NoStrategiesSelected.to_string(),
        "Please select at least one strategy"
    );
}

#[test]
fn active_only_filter_unchecks_and_disables_inactive() {
    let mut state = selection();
    state.select_all(false);
    assert_eq!(state.selected_wallet_count(), 3);

    state.toggle_active_only_filter(true);
    assert_eq!(
        state.selected_wallet_ids(),
        vec![WalletId::new(1), WalletId::new(3)]
    );
    let inactive = &state.wallets()[1];
    assert!(inactive.is_disabled());
    assert!(!inactive.is_checked());
    assert!(matches!(
        state.set_wallet(WalletId::new(2), true),
        Err(SelectionError::WalletDisabled(_))
    ));

    state.toggle_active_only_filter(false);
    assert!(state.wallets().iter().all(|w| !w.is_disabled()));
    assert!(!state.wallets()[1].is_checked());
}

#[test]
fn select_all_active_only_leaves_inactive_unchecked() {
    let mut state = selection();
    state.select_all(true);
    assert_eq!(
        state.selected_wallet_ids(),
        vec![WalletId::new(1), WalletId::new(3)]
    );

    state.deselect_all();
    assert_eq!(state.selected_wallet_count(), 0);
}

#[test]
fn unchecking_strategy_forgets_its_values() {
    let mut state = selection();
    state.set_strategy(&StrategyKind::MultiHop, true).unwrap();
    state
        .set_param(&StrategyKind::MultiHop, "max_hops", "5")
        .unwrap();

    state.set_strategy(&StrategyKind::MultiHop, false).unwrap();
    assert!(state.panel(&StrategyKind::MultiHop).is_none());

    state.set_strategy(&StrategyKind::MultiHop, true).unwrap();
    let panel = state.panel(&StrategyKind::MultiHop).unwrap();
    assert_eq!(panel.value("max_hops"), Some("3"));
}

#[test]
fn parameters_are_checked_against_schema() {
    let mut state = selection();
    state.set_strategy(&StrategyKind::CrossChain, true).unwrap();

    assert!(matches!(
        state.set_param(&StrategyKind::CrossChain, "target_chain", "solana"),
        Err(SelectionError::InvalidParameter { .. })
    ));
    assert!(matches!(
        state.set_param(&StrategyKind::CrossChain, "amount", "lots"),
        Err(SelectionError::InvalidParameter { .. })
    ));
    assert!(matches!(
        state.set_param(&StrategyKind::CrossChain, "slippage", "1"),
        Err(SelectionError::UnknownParameter { .. })
    ));
    assert!(matches!(
        state.set_param(&StrategyKind::FlashLoan, "amount", "1"),
        Err(SelectionError::StrategyNotSelected(_))
    ));
}

#[test]
fn unregistered_strategy_is_refused() {
    let mut state = SelectionState::new(roster(), vec![StrategyKind::FlashLoan]);
    assert!(matches!(
        state.set_strategy(&StrategyKind::MultiHop, true),
        Err(SelectionError::UnknownStrategy(_))
    ));
}

#[test]
fn unknown_strategy_tag_submits_with_empty_params() {
    let custom = StrategyKind::from_tag("momentum_swing");
    let mut state = SelectionState::new(roster(), vec![custom.clone()]);
    state.set_wallet(WalletId::new(1), true).unwrap();
    state.set_strategy(&custom, true).unwrap();

    let request = state.build_request(ExecutionMode::Parallel).unwrap();
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["strategy_types"], json!(["momentum_swing"]));
    assert_eq!(value["strategy_params"], json!({ "momentum_swing": {} }));
}

#[test]
fn registered_tag_goes_on_the_wire_as_spelled() {
    let custom = StrategyKind::from_tag("Liquidation-Sniper");
    let mut state = SelectionState::new(roster(), vec![custom.clone()]);
    state.set_wallet(WalletId::new(1), true).unwrap();
    state.set_strategy(&custom, true).unwrap();

    let panel = state.panel(&custom).unwrap();
    assert_eq!(panel.schema().title, "Liquidation-Sniper Parameters");

    let request = state.build_request(ExecutionMode::Parallel).unwrap();
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["strategy_types"], json!(["Liquidation-Sniper"]));
    assert_eq!(value["strategy_params"], json!({ "Liquidation-Sniper": {} }));
}

#[test]
fn schemas_offer_defaults_inside_their_options() {
    for kind in StrategyKind::KNOWN {
        let schema = schema_for(&kind);
        assert!(!schema.fields.is_empty(), "{kind} has no fields");
        for field in schema.fields {
            if let FieldKind::Select { options } = field.kind {
                assert!(
                    options.iter().any(|o| o.value == field.default),
                    "{kind}.{} default not among options",
                    field.name
                );
            }
        }
    }
}
