//! REST API client for the CoinDCX cryptocurrency exchange
//!
//! This crate provides a typed client covering market data, spot trading,
//! margin trading and futures.
//!
//! # Features
//!
//! - **Market Data**: Ticker, markets, trades, orderbook, candles
//! - **Spot**: Balances, order placement, status, cancellation, trade history
//! - **Margin**: Orders with targets, stop losses and margin adjustments
//! - **Futures**: Instruments, orders, positions, transactions
//!
//! # Authentication
//!
//! Authenticated endpoints take a JSON body signed with HMAC-SHA256. The body
//! gets a millisecond `timestamp`, is serialized once, and the signed bytes
//! are sent unmodified. Calling an authenticated endpoint without both key and
//! secret fails with [`RestError::Authentication`] before any network I/O.
//!
//! # Example
//!
//! ```no_run
//! use coindcx_rest::{CoinDcxClient, Credentials, OrderSide, SpotOrder};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CoinDcxClient::new()?;
//!     let book = client.get_orderbook("B-BTC_USDT").await?;
//!     println!("Orderbook: {}", book);
//!
//!     // Authenticated endpoints
//!     let auth_client = CoinDcxClient::with_credentials(Credentials::from_env()?)?;
//!     let order = SpotOrder::limit("SNTBTC", OrderSide::Buy, dec!(400), dec!(0.03244));
//!     let placed = auth_client.spot().create_order(&order).await?;
//!     println!("Placed: {}", placed);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors and retries
//!
//! Every failure is a [`RestError`]. The client never retries;
//! [`RestError::is_retryable`] tells callers which failures (rate limits,
//! transport errors) may succeed on a later attempt.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod query;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CoinDcxClient, API_BASE_URL, DEFAULT_TIMEOUT_SECS, PUBLIC_BASE_URL};
pub use coindcx_auth::{AuthError, Credentials};
pub use error::{ErrorBody, ErrorKind, RestError, RestResult};
pub use executor::{interpret_response, join_url, Clock, Host, RequestDescriptor, RequestExecutor};
pub use query::{QueryParams, QueryValue};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

// Re-export request types
pub use types::{
    // Spot
    OrderRef, SpotOrder, TradeHistoryQuery,
    // Margin
    MarginOrder, MarginOrderQuery,
    // Futures
    FuturesOrder, FuturesOrderEdit, FuturesOrderQuery, FuturesTradeQuery, FuturesTransactionQuery,
    PositionFilter, TriggerOrder,
};

// Re-export wire enums
pub use coindcx_types::{
    CandleInterval, ExchangeCode, FuturesMarginMode, FuturesOrderType, FuturesResolution,
    IntoWire, MarginOrderType, NotificationType, OrderSide, OrderbookDepth, PositionMarginType,
    SpotOrderType, TimeInForce, TypesError, WireEnum,
};
