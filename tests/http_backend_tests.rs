//! `HttpBackend` against a local stub server.

mod support;

use std::collections::BTreeMap;

use rust_decimal_macros::dec;
use serde_json::json;
use stratagem::adapter::outbound::http::{ApiConfig, HttpBackend, CSRF_HEADER};
use stratagem::core::domain::{
    ExecutionMode, ExecutionRequest, StrategyKind, StrategyParameters, WalletId,
};
use stratagem::error::TransportError;
use stratagem::port::outbound::backend::StrategyBackend;
use support::http::{Route, StubServer, EXECUTE_OK_BODY, WALLETS_BODY};

const EXECUTE_PATH: &str = "/api/execute/wallet_strategies";
const WALLETS_PATH: &str = "/api/wallets";

fn backend_for(server: &StubServer) -> HttpBackend {
    let config = ApiConfig {
        base_url: server.base_url.clone(),
        timeout_ms: 5_000,
        retry_max_attempts: 1,
        retry_backoff_ms: 0,
        csrf_token: Some("token-123".into()),
        session_cookie: Some("session=abc".into()),
        ..ApiConfig::default()
    };
    HttpBackend::from_config(&config)
}

fn request() -> ExecutionRequest {
    let mut params = StrategyParameters::new();
    params.insert(
        StrategyKind::MultiHop,
        BTreeMap::from([
            ("amount".to_string(), "10000".to_string()),
            ("max_hops".to_string(), "3".to_string()),
            ("min_profit".to_string(), "0.5".to_string()),
        ]),
    );
    ExecutionRequest::new(
        vec![WalletId::new(1), WalletId::new(3)],
        vec![StrategyKind::MultiHop],
        ExecutionMode::Parallel,
        params,
    )
}

#[tokio::test]
async fn batch_post_carries_token_and_body() {
    let server = StubServer::spawn(vec![Route::new("POST", EXECUTE_PATH, 200, EXECUTE_OK_BODY)]);
    let backend = backend_for(&server);

    let result = backend.execute_batch(&request()).await.unwrap();

    assert!(result.success);
    assert_eq!(result.total_profit, dec!(12.5));
    assert_eq!(result.wallets.len(), 1);
    assert_eq!(result.wallets[0].strategies[0].strategy, StrategyKind::MultiHop);

    let requests = server.requests_to(EXECUTE_PATH);
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.header(CSRF_HEADER), Some("token-123"));
    assert_eq!(sent.header("cookie"), Some("session=abc"));
    assert!(sent
        .header("content-type")
        .is_some_and(|value| value.starts_with("application/json")));
    assert_eq!(
        sent.json(),
        json!({
            "wallet_ids": [1, 3],
            "strategy_types": ["multi_hop"],
            "execution_mode": "parallel",
            "strategy_params": {
                "multi_hop": { "amount": "10000", "max_hops": "3", "min_profit": "0.5" }
            }
        })
    );
}

#[tokio::test]
async fn error_status_with_failure_body_is_a_rejected_result() {
    let server = StubServer::spawn(vec![Route::new(
        "POST",
        EXECUTE_PATH,
        500,
        r#"{"success": false, "error": "insufficient liquidity"}"#,
    )]);
    let backend = backend_for(&server);

    let result = backend.execute_batch(&request()).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.error_message(), "insufficient liquidity");
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = StubServer::spawn(vec![Route::new(
        "POST",
        EXECUTE_PATH,
        502,
        "<html>Bad Gateway</html>",
    )]);
    let backend = backend_for(&server);

    let err = backend.execute_batch(&request()).await.unwrap_err();

    match err {
        TransportError::MalformedResponse { status, .. } => assert_eq!(status, 502),
        other => panic!("expected malformed response, got {other:?}"),
    }
}

#[tokio::test]
async fn batch_is_not_retried() {
    let server = StubServer::spawn(vec![Route::new("POST", EXECUTE_PATH, 500, "oops")]);
    let config = ApiConfig {
        base_url: server.base_url.clone(),
        retry_max_attempts: 5,
        retry_backoff_ms: 0,
        ..ApiConfig::default()
    };
    let backend = HttpBackend::from_config(&config);

    assert!(backend.execute_batch(&request()).await.is_err());
    assert_eq!(server.requests_to(EXECUTE_PATH).len(), 1);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9".into(),
        connect_timeout_ms: 500,
        retry_max_attempts: 1,
        ..ApiConfig::default()
    };
    let backend = HttpBackend::from_config(&config);

    let err = backend.execute_batch(&request()).await.unwrap_err();
    assert!(matches!(err, TransportError::Http(_)));
}

#[tokio::test]
async fn wallet_roster_parses() {
    let server = StubServer::spawn(vec![Route::new("GET", WALLETS_PATH, 200, WALLETS_BODY)]);
    let backend = backend_for(&server);

    let wallets = backend.list_wallets().await.unwrap();

    assert_eq!(wallets.len(), 3);
    assert_eq!(wallets[0].id(), WalletId::new(1));
    assert_eq!(wallets[0].chain(), "ethereum");
    assert_eq!(wallets[0].usd_balance(), Some(dec!(2500)));
    assert!(!wallets[1].is_active());
    assert_eq!(wallets[2].usd_balance(), None);

    let sent = &server.requests_to(WALLETS_PATH)[0];
    assert_eq!(sent.header("cookie"), Some("session=abc"));
}

#[tokio::test]
async fn wallet_roster_failure_body_is_an_error() {
    let server = StubServer::spawn(vec![Route::new(
        "GET",
        WALLETS_PATH,
        200,
        r#"{"success": false, "error": "session expired"}"#,
    )]);
    let backend = backend_for(&server);

    let err = backend.list_wallets().await.unwrap_err();
    assert_eq!(err.to_string(), "session expired");
}
