//! Common test utilities for integration tests
//!
//! Clients here run on a `MockTransport`, so every test can inspect the exact
//! request that would have gone over the wire.

#![allow(dead_code)]

use coindcx_rest::{ClientConfig, CoinDcxClient, Credentials, HttpRequest, MockTransport};
use serde_json::Value;
use std::sync::Arc;

pub const API_KEY: &str = "test_api_key";
pub const API_SECRET: &str = "test_api_secret";

/// Fixed timestamp used by `fixed_clock`
pub const FIXED_MS: u64 = 1_700_000_000_000;

pub fn fixed_clock() -> u64 {
    FIXED_MS
}

/// Sample balances response
pub const BALANCES_RESPONSE: &str = r#"[
    {"currency": "BTC", "balance": 1.167, "locked_balance": 2.1},
    {"currency": "USDT", "balance": 250.5, "locked_balance": 0}
]"#;

/// Sample orderbook response from the public host
pub const ORDERBOOK_RESPONSE: &str = r#"{
    "bids": {"11570.67000000": "0.000871", "11570.58000000": "0.001974"},
    "asks": {"13872.00000000": "0.000014", "13900.00000000": "0.000212"}
}"#;

/// Authenticated client on a mock transport with a fixed clock
pub fn signed_client() -> (CoinDcxClient, Arc<MockTransport>) {
    client_with(
        ClientConfig::new()
            .with_credentials(Credentials::new(API_KEY, API_SECRET))
            .with_clock(fixed_clock),
    )
}

/// Authenticated client on a mock transport using the system clock
pub fn live_clock_client() -> (CoinDcxClient, Arc<MockTransport>) {
    client_with(ClientConfig::new().with_credentials(Credentials::new(API_KEY, API_SECRET)))
}

/// Client without credentials on a mock transport
pub fn public_client() -> (CoinDcxClient, Arc<MockTransport>) {
    client_with(ClientConfig::new())
}

pub fn client_with(config: ClientConfig) -> (CoinDcxClient, Arc<MockTransport>) {
    let mock = Arc::new(MockTransport::new());
    let client = CoinDcxClient::with_transport(config, mock.clone()).unwrap();
    (client, mock)
}

/// Parse the body of a recorded request
pub fn sent_body(request: &HttpRequest) -> Value {
    let body = request.body.as_deref().expect("request has a body");
    serde_json::from_slice(body).expect("body is JSON")
}

/// The only request the mock received
pub fn only_request(mock: &MockTransport) -> HttpRequest {
    let requests = mock.requests();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.into_iter().next().unwrap()
}
