//! Futures (derivatives) endpoints
//!
//! Instrument data, trades, orderbooks and candles are public. Orders,
//! positions and transactions require authentication.

use coindcx_types::{
    FuturesMarginMode, FuturesResolution, IntoWire, OrderbookDepth, PositionMarginType, WireEnum,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{RestError, RestResult};
use crate::executor::{RequestDescriptor, RequestExecutor};
use crate::types::{
    decimal_value, margin_list, FuturesOrder, FuturesOrderEdit, FuturesOrderQuery,
    FuturesTradeQuery, FuturesTransactionQuery, PositionFilter, TriggerOrder,
};

const FUTURES_PREFIX: &str = "/exchange/v1/derivatives/futures";

/// Futures endpoints
pub struct FuturesEndpoints<'a> {
    executor: &'a RequestExecutor,
}

fn signed(path: &str) -> RequestDescriptor {
    RequestDescriptor::post(format!("{FUTURES_PREFIX}/{path}"))
}

fn margin_names(margins: &[FuturesMarginMode]) -> Vec<&'static str> {
    if margins.is_empty() {
        vec![FuturesMarginMode::default().as_str()]
    } else {
        margins.iter().map(|m| m.as_str()).collect()
    }
}

impl<'a> FuturesEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    // ========================================================================
    // Public data
    // ========================================================================

    /// List active instruments for the given margin currencies (USDT if empty)
    #[instrument(skip(self))]
    pub async fn get_active_instruments(&self, margins: &[FuturesMarginMode]) -> RestResult<Value> {
        let request = RequestDescriptor::get(format!("{FUTURES_PREFIX}/data/active_instruments"))
            .query_list("margin_currency_short_name", margin_names(margins));
        self.executor.execute(request).await
    }

    /// Get contract details for one instrument
    #[instrument(skip(self, margin))]
    pub async fn get_instrument_details(
        &self,
        pair: &str,
        margin: impl IntoWire<FuturesMarginMode>,
    ) -> RestResult<Value> {
        let margin = margin.into_wire()?;
        let request = RequestDescriptor::get(format!("{FUTURES_PREFIX}/data/instrument"))
            .query("pair", pair)
            .query("margin_currency_short_name", margin.as_str());
        self.executor.execute(request).await
    }

    /// Get recent trades for an instrument
    #[instrument(skip(self))]
    pub async fn get_trades(&self, pair: &str) -> RestResult<Value> {
        let request =
            RequestDescriptor::get(format!("{FUTURES_PREFIX}/data/trades")).query("pair", pair);
        self.executor.execute(request).await
    }

    /// Get an orderbook snapshot
    #[instrument(skip(self, depth))]
    pub async fn get_orderbook(&self, pair: &str, depth: impl IntoWire<OrderbookDepth>) -> RestResult<Value> {
        let depth = depth.into_wire()?;
        let request = RequestDescriptor::get(format!(
            "/market_data/v3/orderbook/{}-futures/{}",
            pair,
            depth.as_str()
        ))
        .on_public_host();
        self.executor.execute(request).await
    }

    /// Get candlesticks
    ///
    /// # Arguments
    /// * `from` / `to` - Range bounds in seconds
    /// * `resolution` - "1", "5", "60" or "1D"
    #[instrument(skip(self, resolution))]
    pub async fn get_candles(
        &self,
        pair: &str,
        from: u64,
        to: u64,
        resolution: impl IntoWire<FuturesResolution>,
    ) -> RestResult<Value> {
        let resolution = resolution.into_wire()?;
        let request = RequestDescriptor::get("/market_data/candlesticks")
            .on_public_host()
            .query("pair", pair)
            .query("from", from)
            .query("to", to)
            .query("resolution", resolution.as_str())
            .query("pcode", "f");
        self.executor.execute(request).await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// List orders
    #[instrument(skip(self))]
    pub async fn list_orders(&self, query: &FuturesOrderQuery) -> RestResult<Value> {
        self.executor
            .execute(signed("orders").body(query.to_body()))
            .await
    }

    /// Place an order
    ///
    /// # Errors
    /// `RestError::InvalidOrder` if a required price or stop price is
    /// missing; nothing is sent in that case.
    #[instrument(skip(self, order), fields(pair = %order.pair, side = %order.side, order_type = %order.order_type))]
    pub async fn create_order(&self, order: &FuturesOrder) -> RestResult<Value> {
        let body = order.to_body()?;
        debug!(
            "Placing futures {} {} order for {} {}",
            order.side, order.order_type, order.total_quantity, order.pair
        );

        self.executor
            .execute(signed("orders/create").body(body))
            .await
    }

    /// Cancel an order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &str) -> RestResult<Value> {
        self.executor
            .execute(signed("orders/cancel").field("id", id))
            .await
    }

    /// Change quantity, price or attached triggers of an open order
    #[instrument(skip(self))]
    pub async fn edit_order(&self, edit: &FuturesOrderEdit) -> RestResult<Value> {
        let body = edit.to_body()?;
        self.executor
            .execute(signed("orders/edit").body(body))
            .await
    }

    // ========================================================================
    // Positions
    // ========================================================================

    /// List positions
    #[instrument(skip(self))]
    pub async fn list_positions(
        &self,
        page: u32,
        size: u32,
        margins: &[FuturesMarginMode],
    ) -> RestResult<Value> {
        let request = signed("positions")
            .field("page", page)
            .field("size", size)
            .field("margin_currency_short_name", margin_list(margins));
        self.executor.execute(request).await
    }

    /// List positions matching pairs or position ids
    #[instrument(skip(self))]
    pub async fn get_positions_by_filters(&self, filter: &PositionFilter) -> RestResult<Value> {
        self.executor
            .execute(signed("positions").body(filter.to_body()))
            .await
    }

    /// Set leverage for an instrument
    #[instrument(skip(self, margin))]
    pub async fn update_leverage(
        &self,
        pair: &str,
        leverage: u32,
        margin: impl IntoWire<FuturesMarginMode>,
    ) -> RestResult<Value> {
        let margin = margin.into_wire()?;
        let request = signed("positions/update_leverage")
            .field("pair", pair)
            .field("leverage", leverage)
            .field("margin_currency_short_name", margin.as_str());
        self.executor.execute(request).await
    }

    /// Add margin to a position
    #[instrument(skip(self))]
    pub async fn add_margin(&self, position_id: &str, amount: Decimal) -> RestResult<Value> {
        let request = signed("positions/add_margin")
            .field("id", position_id)
            .field("amount", decimal_value(amount));
        self.executor.execute(request).await
    }

    /// Release margin from a position
    #[instrument(skip(self))]
    pub async fn remove_margin(&self, position_id: &str, amount: Decimal) -> RestResult<Value> {
        let request = signed("positions/remove_margin")
            .field("id", position_id)
            .field("amount", decimal_value(amount));
        self.executor.execute(request).await
    }

    /// Cancel every open order for the given margin currencies (USDT if empty)
    #[instrument(skip(self))]
    pub async fn cancel_all_open_orders(&self, margins: &[FuturesMarginMode]) -> RestResult<Value> {
        let request = signed("positions/cancel_all_open_orders")
            .field("margin_currency_short_name", margin_list(margins));
        self.executor.execute(request).await
    }

    /// Cancel every open order attached to one position
    #[instrument(skip(self))]
    pub async fn cancel_all_open_orders_for_position(&self, position_id: &str) -> RestResult<Value> {
        self.executor
            .execute(signed("positions/cancel_all_open_orders_for_position").field("id", position_id))
            .await
    }

    /// Close a position at market
    #[instrument(skip(self))]
    pub async fn exit_position(&self, position_id: &str) -> RestResult<Value> {
        self.executor
            .execute(signed("positions/exit").field("id", position_id))
            .await
    }

    /// Attach take-profit and/or stop-loss triggers to a position
    ///
    /// # Errors
    /// `RestError::InvalidOrder` if neither leg is given or a leg is malformed
    #[instrument(skip(self))]
    pub async fn create_tpsl(
        &self,
        position_id: &str,
        take_profit: Option<&TriggerOrder>,
        stop_loss: Option<&TriggerOrder>,
    ) -> RestResult<Value> {
        if take_profit.is_none() && stop_loss.is_none() {
            return Err(RestError::InvalidOrder(
                "take profit or stop loss is required".into(),
            ));
        }
        let take_profit = take_profit.map(TriggerOrder::to_value).transpose()?;
        let stop_loss = stop_loss.map(TriggerOrder::to_value).transpose()?;

        let request = signed("positions/create_tpsl")
            .field("id", position_id)
            .field_opt("take_profit", take_profit)
            .field_opt("stop_loss", stop_loss);
        self.executor.execute(request).await
    }

    /// List position transactions (fills, funding, fees)
    #[instrument(skip(self))]
    pub async fn get_transactions(&self, query: &FuturesTransactionQuery) -> RestResult<Value> {
        self.executor
            .execute(signed("positions/transactions").body(query.to_body()))
            .await
    }

    /// List executed futures trades
    #[instrument(skip(self))]
    pub async fn get_trade_history(&self, query: &FuturesTradeQuery) -> RestResult<Value> {
        self.executor
            .execute(signed("trades").body(query.to_body()))
            .await
    }

    /// Switch an instrument between isolated and crossed margin
    #[instrument(skip(self, margin_type))]
    pub async fn change_margin_type(
        &self,
        pair: &str,
        margin_type: impl IntoWire<PositionMarginType>,
    ) -> RestResult<Value> {
        let margin_type = margin_type.into_wire()?;
        let request = signed("positions/margin_type")
            .field("pair", pair)
            .field("margin_type", margin_type.as_str());
        self.executor.execute(request).await
    }
}
