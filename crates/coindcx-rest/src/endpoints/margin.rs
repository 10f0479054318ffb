//! Margin trading endpoints
//!
//! These endpoints require authentication. Orders are addressed by the
//! exchange-assigned id returned from `create_order`.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::RestResult;
use crate::executor::{RequestDescriptor, RequestExecutor};
use crate::types::{decimal_value, MarginOrder, MarginOrderQuery};

const MARGIN_PREFIX: &str = "/exchange/v1/margin";

/// Margin trading endpoints
pub struct MarginEndpoints<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> MarginEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    fn request(action: &str) -> RequestDescriptor {
        RequestDescriptor::post(format!("{MARGIN_PREFIX}/{action}"))
    }

    async fn with_id(&self, action: &str, id: &str) -> RestResult<Value> {
        self.executor
            .execute(Self::request(action).field("id", id))
            .await
    }

    async fn with_id_and_price(&self, action: &str, id: &str, key: &str, value: Decimal) -> RestResult<Value> {
        let request = Self::request(action)
            .field("id", id)
            .field(key, decimal_value(value));
        self.executor.execute(request).await
    }

    /// Place a margin order
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side, order_type = %order.order_type))]
    pub async fn create_order(&self, order: &MarginOrder) -> RestResult<Value> {
        let body = order.to_body()?;
        debug!(
            "Placing margin {} {} order for {} {}",
            order.side, order.order_type, order.quantity, order.market
        );

        self.executor
            .execute(Self::request("create").body(body))
            .await
    }

    /// Cancel an open margin order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &str) -> RestResult<Value> {
        self.with_id("cancel", id).await
    }

    /// Close a margin position at market
    #[instrument(skip(self))]
    pub async fn exit_order(&self, id: &str) -> RestResult<Value> {
        self.with_id("exit", id).await
    }

    /// Change the take-profit target
    #[instrument(skip(self))]
    pub async fn edit_target(&self, id: &str, target_price: Decimal) -> RestResult<Value> {
        self.with_id_and_price("edit_target", id, "target_price", target_price)
            .await
    }

    /// Change the stop-loss price
    #[instrument(skip(self))]
    pub async fn edit_stop_loss(&self, id: &str, sl_price: Decimal) -> RestResult<Value> {
        self.with_id_and_price("edit_sl", id, "sl_price", sl_price).await
    }

    /// Change the trailing stop-loss price
    #[instrument(skip(self))]
    pub async fn edit_trailing_stop_loss(&self, id: &str, sl_price: Decimal) -> RestResult<Value> {
        self.with_id_and_price("edit_trailing_sl", id, "sl_price", sl_price)
            .await
    }

    /// Add margin to an open position
    #[instrument(skip(self))]
    pub async fn add_margin(&self, id: &str, amount: Decimal) -> RestResult<Value> {
        self.with_id_and_price("add_margin", id, "amount", amount).await
    }

    /// Release margin from an open position
    #[instrument(skip(self))]
    pub async fn remove_margin(&self, id: &str, amount: Decimal) -> RestResult<Value> {
        self.with_id_and_price("remove_margin", id, "amount", amount)
            .await
    }

    /// List margin orders
    #[instrument(skip(self))]
    pub async fn get_orders(&self, query: &MarginOrderQuery) -> RestResult<Value> {
        self.executor
            .execute(Self::request("fetch_orders").body(query.to_body()))
            .await
    }

    /// Get one margin order
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> RestResult<Value> {
        self.with_id("order", id).await
    }
}
