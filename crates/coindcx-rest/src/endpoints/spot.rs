//! Spot account and order endpoints
//!
//! These endpoints require authentication.

use coindcx_types::{OrderSide, WireEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{RestError, RestResult};
use crate::executor::{RequestDescriptor, RequestExecutor};
use crate::types::{decimal_value, OrderRef, SpotOrder, TradeHistoryQuery};

/// Spot trading endpoints
pub struct SpotEndpoints<'a> {
    executor: &'a RequestExecutor,
}

fn id_list(ids: impl IntoIterator<Item = impl Into<String>>) -> Value {
    Value::from(ids.into_iter().map(Into::into).collect::<Vec<String>>())
}

impl<'a> SpotEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// Get balances for every currency
    #[instrument(skip(self))]
    pub async fn get_balances(&self) -> RestResult<Value> {
        self.executor
            .execute(RequestDescriptor::post("/exchange/v1/users/balances"))
            .await
    }

    /// Get account information
    #[instrument(skip(self))]
    pub async fn get_user_info(&self) -> RestResult<Value> {
        self.executor
            .execute(RequestDescriptor::post("/exchange/v1/users/info"))
            .await
    }

    /// Place an order
    ///
    /// # Errors
    /// `RestError::InvalidOrder` if the order is missing a required price;
    /// nothing is sent in that case.
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side, order_type = %order.order_type))]
    pub async fn create_order(&self, order: &SpotOrder) -> RestResult<Value> {
        let body = order.to_body()?;
        debug!(
            "Placing {} {} order for {} {}",
            order.side, order.order_type, order.total_quantity, order.market
        );

        self.executor
            .execute(RequestDescriptor::post("/exchange/v1/orders/create").body(body))
            .await
    }

    /// Place several orders in one request
    ///
    /// Every order is validated before anything is sent.
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn create_orders(&self, orders: &[SpotOrder]) -> RestResult<Value> {
        if orders.is_empty() {
            return Err(RestError::InvalidOrder("at least one order is required".into()));
        }
        let orders = orders
            .iter()
            .map(|o| o.to_body().map(Value::Object))
            .collect::<RestResult<Vec<_>>>()?;

        let request = RequestDescriptor::post("/exchange/v1/orders/create_multiple")
            .field("orders", orders);
        self.executor.execute(request).await
    }

    /// Get the status of one order
    #[instrument(skip(self))]
    pub async fn get_order_status(&self, order: &OrderRef) -> RestResult<Value> {
        let (key, value) = order.as_field();
        let request = RequestDescriptor::post("/exchange/v1/orders/status").field(key, value);
        self.executor.execute(request).await
    }

    /// Get the status of several orders by id
    #[instrument(skip(self, ids))]
    pub async fn get_orders_status(&self, ids: impl IntoIterator<Item = impl Into<String>>) -> RestResult<Value> {
        let request = RequestDescriptor::post("/exchange/v1/orders/status_multiple")
            .field("ids", id_list(ids));
        self.executor.execute(request).await
    }

    /// List open orders for a market
    #[instrument(skip(self))]
    pub async fn get_active_orders(&self, market: &str, side: Option<OrderSide>) -> RestResult<Value> {
        let request = RequestDescriptor::post("/exchange/v1/orders/active_orders")
            .field("market", market)
            .field_opt("side", side.map(|s| s.as_str()));
        self.executor.execute(request).await
    }

    /// Count open orders for a market
    #[instrument(skip(self))]
    pub async fn get_active_orders_count(&self, market: &str, side: Option<OrderSide>) -> RestResult<Value> {
        let request = RequestDescriptor::post("/exchange/v1/orders/active_orders_count")
            .field("market", market)
            .field_opt("side", side.map(|s| s.as_str()));
        self.executor.execute(request).await
    }

    /// Get executed trades
    #[instrument(skip(self))]
    pub async fn get_trade_history(&self, query: &TradeHistoryQuery) -> RestResult<Value> {
        let request =
            RequestDescriptor::post("/exchange/v1/orders/trade_history").body(query.to_body());
        self.executor.execute(request).await
    }

    /// Cancel one order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order: &OrderRef) -> RestResult<Value> {
        let (key, value) = order.as_field();
        let request = RequestDescriptor::post("/exchange/v1/orders/cancel").field(key, value);
        self.executor.execute(request).await
    }

    /// Cancel every open order in a market, optionally one side only
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self, market: &str, side: Option<OrderSide>) -> RestResult<Value> {
        let request = RequestDescriptor::post("/exchange/v1/orders/cancel_all")
            .field("market", market)
            .field_opt("side", side.map(|s| s.as_str()));
        self.executor.execute(request).await
    }

    /// Cancel several orders by id
    #[instrument(skip(self, ids))]
    pub async fn cancel_orders_by_ids(&self, ids: impl IntoIterator<Item = impl Into<String>>) -> RestResult<Value> {
        let request = RequestDescriptor::post("/exchange/v1/orders/cancel_by_ids")
            .field("ids", id_list(ids));
        self.executor.execute(request).await
    }

    /// Change the price of an open limit order
    #[instrument(skip(self))]
    pub async fn edit_order_price(&self, id: &str, price_per_unit: Decimal) -> RestResult<Value> {
        let request = RequestDescriptor::post("/exchange/v1/orders/edit")
            .field("id", id)
            .field("price_per_unit", decimal_value(price_per_unit));
        self.executor.execute(request).await
    }
}
