//! End-to-end tests: command line in, recorded HTTP request out

use coindcx_cli::methods::METHODS;
use coindcx_cli::{invoke, prepare, Cli, CliError, Commands, GlobalArgs, Invocation, EXIT_USAGE};
use coindcx_rest::{CoinDcxClient, MockTransport};
use clap::Parser;
use serde_json::{json, Value};
use std::sync::Arc;

fn global() -> GlobalArgs {
    GlobalArgs {
        api_key: Some("test_api_key".into()),
        api_secret: Some("test_api_secret".into()),
        timeout: 30,
        compact: false,
    }
}

fn anonymous() -> GlobalArgs {
    GlobalArgs {
        api_key: None,
        api_secret: None,
        ..global()
    }
}

fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn mock_client(invocation: &Invocation) -> (CoinDcxClient, Arc<MockTransport>) {
    let mock = Arc::new(MockTransport::new());
    let client = CoinDcxClient::with_transport(invocation.options.to_config(), mock.clone()).unwrap();
    (client, mock)
}

async fn call(global: &GlobalArgs, raw: &[&str], response: Value) -> (Result<Value, CliError>, Arc<MockTransport>) {
    let invocation = prepare(global, &args(raw)).unwrap();
    let (client, mock) = mock_client(&invocation);
    mock.push_json(200, &response);
    (invoke(&client, &invocation).await, mock)
}

fn sent_body(mock: &MockTransport) -> Value {
    let request = mock.last_request().unwrap();
    serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
}

/// Minimal valid value for a required parameter
fn sample(method: &str, param: &str) -> &'static str {
    match param {
        "pair" => "B-BTC_USDT",
        "interval" => "1m",
        "resolution" => "1D",
        "side" => "buy",
        "order_type" if method.starts_with("futures_") => "market",
        "order_type" => "market_order",
        "market" => "SNTBTC",
        "ids" => "a,b",
        "id" => "order-1",
        "from_time" => "1700000000",
        "to_time" => "1700086400",
        "leverage" => "5",
        "margin_type" => "isolated",
        _ => "1",
    }
}

#[tokio::test]
async fn every_method_dispatches_one_request() {
    for method in METHODS {
        let mut raw = vec![method.name.to_string()];
        for param in method.params.iter().filter(|p| p.required) {
            raw.push(format!("--{}={}", param.name, sample(method.name, param.name)));
        }
        match method.name {
            "get_order_status" | "cancel_order" => raw.push("--id=order-1".into()),
            "futures_create_tpsl" => raw.push("--take_profit_price=70000".into()),
            _ => {}
        }

        let invocation = prepare(&global(), &raw).unwrap_or_else(|e| panic!("{}: {e}", method.name));
        let (client, mock) = mock_client(&invocation);
        mock.push_json(200, &json!({"ok": true}));

        let result = invoke(&client, &invocation)
            .await
            .unwrap_or_else(|e| panic!("{}: {e}", method.name));
        assert_eq!(result, json!({"ok": true}), "{}", method.name);
        assert_eq!(mock.call_count(), 1, "{}", method.name);

        let request = mock.last_request().unwrap();
        assert_eq!(
            request.header("X-AUTH-SIGNATURE").is_some(),
            method.authenticated,
            "{} signing",
            method.name
        );
    }
}

#[tokio::test]
async fn public_call_shapes_query() {
    let (result, mock) = call(&anonymous(), &["get_trades", "--pair=B-BTC_USDT"], json!([])).await;
    assert_eq!(result.unwrap(), json!([]));

    let request = mock.last_request().unwrap();
    assert!(request.url.ends_with("/market_data/trade_history"));
    assert!(request
        .query
        .contains(&("pair".to_string(), "B-BTC_USDT".to_string())));
    assert!(request.query.contains(&("limit".to_string(), "30".to_string())));
}

#[tokio::test]
async fn create_order_body_from_strings() {
    let (result, mock) = call(
        &global(),
        &[
            "create_order",
            "--side=buy",
            "--order_type=limit_order",
            "--market=SNTBTC",
            "--total_quantity=400",
            "--price_per_unit=0.03244",
            "--client_order_id=cli-1",
        ],
        json!({"orders": []}),
    )
    .await;
    result.unwrap();

    let body = sent_body(&mock);
    assert_eq!(body["side"], "buy");
    assert_eq!(body["order_type"], "limit_order");
    assert_eq!(body["market"], "SNTBTC");
    assert_eq!(body["total_quantity"], 400);
    assert_eq!(body["price_per_unit"], 0.03244);
    assert_eq!(body["client_order_id"], "cli-1");
    assert!(body["timestamp"].is_u64());
}

#[tokio::test]
async fn limit_order_without_price_is_invalid_order() {
    let invocation = prepare(
        &global(),
        &args(&[
            "create_order",
            "--side=buy",
            "--order_type=limit_order",
            "--market=SNTBTC",
            "--total_quantity=1",
        ]),
    )
    .unwrap();
    let (client, mock) = mock_client(&invocation);

    let err = invoke(&client, &invocation).await.unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn unknown_enum_value_is_invalid_parameter() {
    let invocation = prepare(
        &global(),
        &args(&["get_active_orders", "--market=SNTBTC", "--side=up"]),
    )
    .unwrap();
    let (client, mock) = mock_client(&invocation);

    let err = invoke(&client, &invocation).await.unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn missing_credentials_exit_code() {
    let invocation = prepare(&anonymous(), &args(&["get_balances"])).unwrap();
    let (client, mock) = mock_client(&invocation);

    let err = invoke(&client, &invocation).await.unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn inline_credentials_enable_signing() {
    let (result, mock) = call(
        &anonymous(),
        &["get_balances", "--api-key=inline_key", "--api-secret=inline_secret"],
        json!([]),
    )
    .await;
    result.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.header("X-AUTH-APIKEY"), Some("inline_key"));
}

#[tokio::test]
async fn api_error_exit_code() {
    let invocation = prepare(&global(), &args(&["get_user_info"])).unwrap();
    let (client, mock) = mock_client(&invocation);
    mock.push_response(400, r#"{"code":400,"message":"Invalid request"}"#);

    let err = invoke(&client, &invocation).await.unwrap_err();
    assert_eq!(err.exit_code(), 5);
    assert_eq!(err.report(), "Error (api): [400] Invalid request");
}

#[tokio::test]
async fn rate_limit_exit_code() {
    let invocation = prepare(&anonymous(), &args(&["get_ticker"])).unwrap();
    let (client, mock) = mock_client(&invocation);
    mock.push_response(429, "Too Many Requests");

    let err = invoke(&client, &invocation).await.unwrap_err();
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn futures_lists_and_defaults() {
    let (result, mock) = call(
        &global(),
        &[
            "futures_get_positions_by_filters",
            "--pairs=B-BTC_USDT,B-ETH_USDT",
            r#"--margin_currency_short_name=["USDT","INR"]"#,
        ],
        json!([]),
    )
    .await;
    result.unwrap();

    let body = sent_body(&mock);
    assert_eq!(body["pairs"], "B-BTC_USDT,B-ETH_USDT");
    assert_eq!(body["page"], 1);
    assert_eq!(body["size"], 10);
    assert_eq!(body["margin_currency_short_name"], json!(["USDT", "INR"]));
}

#[tokio::test]
async fn tpsl_requires_a_leg() {
    let invocation = prepare(&global(), &args(&["futures_create_tpsl", "--id=pos-1"])).unwrap();
    let (client, mock) = mock_client(&invocation);

    let err = invoke(&client, &invocation).await.unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn order_reference_is_required() {
    let invocation = prepare(&global(), &args(&["cancel_order"])).unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (client, _mock) = mock_client(&invocation);

    let err = runtime.block_on(invoke(&client, &invocation)).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_USAGE);
    assert!(err.report().contains("Usage: coindcx cancel_order"));
}

#[test]
fn usage_errors() {
    let cases: &[&[&str]] = &[
        &["no_such_method"],
        &["get_trades"],
        &["get_trades", "--pair=X", "--bogus=1"],
        &["get_trades", "--pair=X", "--limit=ten"],
        &["get_trades", "pair=X"],
        &["edit_order_price", "--id=1", "--price_per_unit=cheap"],
    ];

    for raw in cases {
        let err = prepare(&global(), &args(raw)).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE, "{raw:?}");
        assert!(err.report().starts_with("Error: "), "{raw:?}");
    }
}

#[test]
fn missing_required_prints_method_usage() {
    let err = prepare(&global(), &args(&["get_trades"])).unwrap_err();
    assert_eq!(
        err.report(),
        "Error: Missing required parameter: --pair\nUsage: coindcx get_trades --pair=<value> [--limit=30]"
    );
}

#[test]
fn command_line_round_trip() {
    let cli = Cli::try_parse_from([
        "coindcx",
        "--api-key",
        "flag_key",
        "--api-secret",
        "flag_secret",
        "get_orderbook",
        "--pair=B-BTC_USDT",
        "--pretty=false",
    ])
    .unwrap();

    let Commands::Call(raw) = cli.command else {
        panic!("expected a method call");
    };
    let invocation = prepare(&cli.global, &raw).unwrap();
    assert_eq!(invocation.method.name, "get_orderbook");
    assert_eq!(invocation.options.api_key.as_deref(), Some("flag_key"));
    assert!(invocation.options.compact);
    assert_eq!(invocation.args.str("pair"), Some("B-BTC_USDT"));
}

#[test]
fn methods_listing_runs_without_network() {
    let cli = Cli::try_parse_from(["coindcx", "methods"]).unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let listing = runtime.block_on(coindcx_cli::run(cli)).unwrap();
    assert!(listing.starts_with("Available methods:"));
    assert!(listing.contains("futures_create_order (auth)"));
}
