//! Public market data endpoints
//!
//! These endpoints don't require authentication. Ticker and market listings
//! live on the primary host; trades, orderbooks and candles on the public host.

use coindcx_types::{CandleInterval, IntoWire, WireEnum};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::RestResult;
use crate::executor::{RequestDescriptor, RequestExecutor};

/// Default number of trades returned by `get_trades`
pub const DEFAULT_TRADES_LIMIT: u32 = 30;

/// Default number of candles returned by `get_candles`
pub const DEFAULT_CANDLES_LIMIT: u32 = 500;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// Get ticker for all markets
    #[instrument(skip(self))]
    pub async fn get_ticker(&self) -> RestResult<Value> {
        self.executor
            .execute(RequestDescriptor::get("/exchange/ticker"))
            .await
    }

    /// Get the list of active market symbols
    #[instrument(skip(self))]
    pub async fn get_markets(&self) -> RestResult<Value> {
        self.executor
            .execute(RequestDescriptor::get("/exchange/v1/markets"))
            .await
    }

    /// Get precision, limits and status for every market
    #[instrument(skip(self))]
    pub async fn get_markets_details(&self) -> RestResult<Value> {
        self.executor
            .execute(RequestDescriptor::get("/exchange/v1/markets_details"))
            .await
    }

    /// Get recent trades
    ///
    /// # Arguments
    /// * `pair` - Market pair (e.g., "B-BTC_USDT")
    /// * `limit` - Number of trades (default 30, max 500)
    #[instrument(skip(self))]
    pub async fn get_trades(&self, pair: &str, limit: Option<u32>) -> RestResult<Value> {
        let limit = limit.unwrap_or(DEFAULT_TRADES_LIMIT);
        debug!("Fetching {} trades for {}", limit, pair);

        let request = RequestDescriptor::get("/market_data/trade_history")
            .on_public_host()
            .query("pair", pair)
            .query("limit", limit);
        self.executor.execute(request).await
    }

    /// Get the orderbook for a pair
    #[instrument(skip(self))]
    pub async fn get_orderbook(&self, pair: &str) -> RestResult<Value> {
        let request = RequestDescriptor::get("/market_data/orderbook")
            .on_public_host()
            .query("pair", pair);
        self.executor.execute(request).await
    }

    /// Get candlesticks
    ///
    /// # Arguments
    /// * `pair` - Market pair (e.g., "B-BTC_USDT")
    /// * `interval` - Candle interval, enum or raw string ("1m", "1h", "1d", ...)
    /// * `start_time` / `end_time` - Range bounds in milliseconds
    /// * `limit` - Number of candles (default 500, max 1000)
    #[instrument(skip(self, interval))]
    pub async fn get_candles(
        &self,
        pair: &str,
        interval: impl IntoWire<CandleInterval>,
        start_time: Option<u64>,
        end_time: Option<u64>,
        limit: Option<u32>,
    ) -> RestResult<Value> {
        let interval = interval.into_wire()?;

        let request = RequestDescriptor::get("/market_data/candles")
            .on_public_host()
            .query("pair", pair)
            .query("interval", interval.as_str())
            .query("limit", limit.unwrap_or(DEFAULT_CANDLES_LIMIT))
            .query_opt("startTime", start_time)
            .query_opt("endTime", end_time);
        self.executor.execute(request).await
    }
}
