//! Request signing and response classification through the full client
//!
//! Most tests run against a `MockTransport`. The real-transport section dials
//! loopback sockets only, so no network access is needed.

mod common;

use common::*;
use coindcx_auth::{hmac_sha256_hex, timestamp_ms, AuthError};
use coindcx_rest::{
    ClientConfig, CoinDcxClient, Credentials, ErrorKind, OrderSide, RequestDescriptor, RestError,
    SpotOrder, TransportError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::json;
use std::net::TcpListener;

// =============================================================================
// Auth gate
// =============================================================================

#[tokio::test]
async fn test_missing_credentials_never_reach_network() {
    let cases = [
        Credentials::none(),
        Credentials::from_parts(Some(API_KEY.into()), None),
        Credentials::from_parts(None, Some(API_SECRET.into())),
        Credentials::from_parts(Some(String::new()), Some(String::new())),
    ];

    for creds in cases {
        let (client, mock) = client_with(ClientConfig::new().with_credentials(creds));

        let err = client.get_balances().await.unwrap_err();
        assert!(matches!(err, RestError::Authentication(AuthError::MissingCredentials)));
        assert_eq!(err.kind(), ErrorKind::Authentication);

        let order = SpotOrder::market("SNTBTC", OrderSide::Buy, dec!(1));
        assert!(client.spot().create_order(&order).await.is_err());
        assert!(client.futures().exit_position("pos-1").await.is_err());

        assert_eq!(mock.call_count(), 0);
    }
}

// =============================================================================
// Signing
// =============================================================================

#[tokio::test]
async fn test_signature_matches_transmitted_bytes() {
    let (client, mock) = signed_client();
    mock.push_response(200, BALANCES_RESPONSE);

    client.get_balances().await.unwrap();

    let request = only_request(&mock);
    let body = request.body.as_deref().unwrap();
    let signature = request.header("X-AUTH-SIGNATURE").unwrap();

    assert_eq!(signature, hmac_sha256_hex(API_SECRET.as_bytes(), body));
    assert_eq!(request.header("X-AUTH-APIKEY"), Some(API_KEY));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_timestamp_injected_near_wall_clock() {
    let (client, mock) = live_clock_client();
    mock.push_response(200, "{}");

    let before = timestamp_ms();
    client.get_user_info().await.unwrap();
    let after = timestamp_ms();

    let body = sent_body(&only_request(&mock));
    let ts = body["timestamp"].as_u64().unwrap();
    assert!(ts + 5_000 >= before && ts <= after + 5_000);
}

#[tokio::test]
async fn test_caller_timestamp_preserved() {
    let (client, mock) = signed_client();
    mock.push_response(200, "{}");

    let request = RequestDescriptor::post("/exchange/v1/users/info").field("timestamp", 42);
    client.request(request).await.unwrap();

    assert_eq!(
        only_request(&mock).body_str(),
        Some(r#"{"timestamp":42}"#)
    );
}

#[tokio::test]
async fn test_fixed_clock_gives_identical_requests() {
    let (client, mock) = signed_client();
    mock.push_response(200, "{}");
    mock.push_response(200, "{}");

    let order = SpotOrder::limit("SNTBTC", OrderSide::Sell, dec!(400), dec!(0.03244));
    client.spot().create_order(&order).await.unwrap();
    client.spot().create_order(&order).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0], requests[1]);
    assert_eq!(
        requests[0].body_str(),
        Some(r#"{"side":"sell","order_type":"limit_order","market":"SNTBTC","price_per_unit":0.03244,"total_quantity":400,"timestamp":1700000000000}"#)
    );
}

#[tokio::test]
async fn test_signed_request_has_no_query() {
    let (client, mock) = signed_client();
    mock.push_response(200, "[]");

    let request = RequestDescriptor::post("/exchange/v1/orders/active_orders")
        .query("ignored", 1)
        .field("market", "SNTBTC");
    client.request(request).await.unwrap();

    let request = only_request(&mock);
    assert!(request.query.is_empty());
    assert_eq!(request.url, "https://api.coindcx.com/exchange/v1/orders/active_orders");
}

// =============================================================================
// Public requests
// =============================================================================

#[tokio::test]
async fn test_public_request_shape() {
    let (client, mock) = public_client();
    mock.push_response(200, ORDERBOOK_RESPONSE);

    let book = client.get_orderbook("B-BTC_USDT").await.unwrap();
    assert!(book["bids"].is_object());

    let request = only_request(&mock);
    assert_eq!(request.url, "https://public.coindcx.com/market_data/orderbook");
    assert_eq!(request.query, vec![("pair".to_string(), "B-BTC_USDT".to_string())]);
    assert_eq!(
        request.full_url().unwrap(),
        "https://public.coindcx.com/market_data/orderbook?pair=B-BTC_USDT"
    );
    assert!(request.body.is_none());
    assert!(request.header("X-AUTH-APIKEY").is_none());
    assert!(request.header("X-AUTH-SIGNATURE").is_none());
}

#[tokio::test]
async fn test_public_request_with_credentials_is_unsigned() {
    let (client, mock) = signed_client();
    mock.push_response(200, r#"["SNTBTC","TRXBTC"]"#);

    let markets = client.get_markets().await.unwrap();
    assert_eq!(markets, json!(["SNTBTC", "TRXBTC"]));
    assert!(only_request(&mock).header("X-AUTH-SIGNATURE").is_none());
}

#[tokio::test]
async fn test_custom_hosts_and_timeout() {
    let (client, mock) = client_with(
        ClientConfig::new()
            .with_base_url("http://localhost:9000/")
            .with_public_url("http://localhost:9001")
            .with_timeout(3),
    );
    mock.push_response(200, "[]");
    mock.push_response(200, "[]");

    client.get_ticker().await.unwrap();
    client.get_trades("B-BTC_USDT", None).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].url, "http://localhost:9000/exchange/ticker");
    assert_eq!(requests[1].url, "http://localhost:9001/market_data/trade_history");
    assert_eq!(requests[0].timeout, std::time::Duration::from_secs(3));
}

// =============================================================================
// Response classification
// =============================================================================

#[tokio::test]
async fn test_rate_limit_classified() {
    let (client, mock) = public_client();
    mock.push_response(429, r#"{"message":"Too many requests"}"#);

    let err = client.get_ticker().await.unwrap_err();
    assert!(err.is_rate_limited());
    assert!(err.is_retryable());
    assert_eq!(err.status_code(), Some(429));
    assert_eq!(err.body_text(), Some(r#"{"message":"Too many requests"}"#));
}

#[tokio::test]
async fn test_json_success_decoded() {
    let (client, mock) = public_client();
    mock.push_response(200, r#"{"a":1}"#);
    assert_eq!(client.get_ticker().await.unwrap(), json!({"a": 1}));
}

#[tokio::test]
async fn test_json_failure_message_extracted() {
    let (client, mock) = signed_client();
    mock.push_response(404, r#"{"message":"not found"}"#);

    match client.get_user_info().await.unwrap_err() {
        RestError::Api { status, message, body } => {
            assert_eq!(status, 404);
            assert_eq!(message, "not found");
            assert_eq!(body.as_json(), Some(&json!({"message": "not found"})));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_success_passed_through() {
    let (client, mock) = public_client();
    mock.push_response(200, "plain text");
    assert_eq!(client.get_ticker().await.unwrap(), json!("plain text"));
}

#[tokio::test]
async fn test_plain_text_failure() {
    let (client, mock) = public_client();
    mock.push_response(503, "Service Unavailable");

    let err = client.get_ticker().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.to_string(), "[503] HTTP 503: Service Unavailable");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_transport_failure_is_request_error() {
    let (client, mock) = public_client();
    mock.push_error(TransportError::Timeout("operation timed out".into()));
    mock.push_error(TransportError::Connect("dns error".into()));

    let timeout = client.get_ticker().await.unwrap_err();
    assert!(matches!(timeout, RestError::Request(TransportError::Timeout(_))));
    assert!(timeout.is_retryable());

    let connect = client.get_markets().await.unwrap_err();
    assert_eq!(connect.kind(), ErrorKind::Request);
    assert_eq!(connect.status_code(), None);
}

#[derive(Debug, Deserialize, PartialEq)]
struct TickerRow {
    market: String,
    last_price: Decimal,
    timestamp: u64,
}

#[tokio::test]
async fn test_execute_as_deserializes_payload() {
    let (client, mock) = public_client();
    mock.push_response(
        200,
        r#"[{"market":"BTCINR","last_price":"5123456.123456789012","timestamp":1700000000}]"#,
    );
    mock.push_response(200, r#"{"market":"BTCINR"}"#);

    let rows: Vec<TickerRow> = client
        .executor()
        .execute_as(RequestDescriptor::get("/exchange/ticker"))
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec![TickerRow {
            market: "BTCINR".into(),
            last_price: dec!(5123456.123456789012),
            timestamp: 1_700_000_000,
        }]
    );

    let err = client
        .executor()
        .execute_as::<Vec<TickerRow>>(RequestDescriptor::get("/exchange/ticker"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
    assert_eq!(mock.call_count(), 2);
}

// =============================================================================
// Real transport
// =============================================================================

fn loopback_client(addr: std::net::SocketAddr, timeout_secs: u64) -> CoinDcxClient {
    CoinDcxClient::with_config(
        ClientConfig::new()
            .with_base_url(format!("http://{addr}"))
            .with_timeout(timeout_secs),
    )
    .unwrap()
}

#[tokio::test]
async fn test_refused_connection_is_connect_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = loopback_client(addr, 2);

    let err = client.get_ticker().await.unwrap_err();
    let RestError::Request(TransportError::Connect(message)) = &err else {
        panic!("expected a connect failure, got {err:?}");
    };
    assert!(message.contains(&addr.to_string()), "{message}");
    assert!(message.to_lowercase().contains("refused"), "{message}");
    assert_eq!(err.kind(), ErrorKind::Request);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_silent_server_times_out() {
    // Accepted by the kernel backlog but never answered
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let client = loopback_client(addr, 1);

    let started = std::time::Instant::now();
    let err = client.get_ticker().await.unwrap_err();
    let RestError::Request(TransportError::Timeout(message)) = &err else {
        panic!("expected a timeout, got {err:?}");
    };
    assert!(message.contains("timed out"), "{message}");
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
    drop(listener);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_concurrent_callers_share_client() {
    let (client, mock) = signed_client();
    for _ in 0..8 {
        mock.push_response(200, "{}");
    }

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let request = RequestDescriptor::post("/exchange/v1/orders/status").field("id", format!("order-{i}"));
            client.request(request).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let requests = mock.requests();
    assert_eq!(requests.len(), 8);
    for request in &requests {
        let body = request.body.as_deref().unwrap();
        assert_eq!(
            request.header("X-AUTH-SIGNATURE").unwrap(),
            hmac_sha256_hex(API_SECRET.as_bytes(), body)
        );
    }
}
