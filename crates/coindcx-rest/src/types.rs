//! Request types for CoinDCX orders and queries
//!
//! Order builders normalize enum-or-string arguments on entry and validate
//! order-type requirements in `to_body()`, before any request is built.

use coindcx_types::{
    ExchangeCode, FuturesMarginMode, FuturesOrderStatus, FuturesOrderType, IntoWire,
    MarginOrderStatus, MarginOrderType, NotificationType, OrderSide, PositionMarginType,
    SpotOrderType, TimeInForce, WireEnum,
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{RestError, RestResult};

// ============================================================================
// Helpers
// ============================================================================

/// Encode a decimal as a JSON number carrying its exact digits
///
/// Trailing zeros are dropped, so `5.00` goes out as `5`.
pub(crate) fn decimal_value(d: Decimal) -> Value {
    let text = d.normalize().to_string();
    match text.parse::<serde_json::Number>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::String(text),
    }
}

/// Margin currencies as a JSON array, defaulting to USDT when empty
pub(crate) fn margin_list(margins: &[FuturesMarginMode]) -> Value {
    if margins.is_empty() {
        return Value::from(vec![FuturesMarginMode::default().as_str()]);
    }
    Value::from(margins.iter().map(|m| m.as_str()).collect::<Vec<_>>())
}

fn join_wire<E: WireEnum>(values: &[E]) -> String {
    values.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(",")
}

fn check_order(
    order_type: &str,
    quantity: Decimal,
    needs_price: bool,
    has_price: bool,
    needs_stop: bool,
    has_stop: bool,
) -> RestResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(RestError::InvalidOrder(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    if needs_price && !has_price {
        return Err(RestError::InvalidOrder(format!(
            "{order_type} order requires a price"
        )));
    }
    if needs_stop && !has_stop {
        return Err(RestError::InvalidOrder(format!(
            "{order_type} order requires a stop price"
        )));
    }
    Ok(())
}

fn insert_opt(body: &mut Map<String, Value>, key: &str, value: Option<impl Into<Value>>) {
    if let Some(v) = value {
        body.insert(key.to_string(), v.into());
    }
}

fn insert_decimal(body: &mut Map<String, Value>, key: &str, value: Option<Decimal>) {
    insert_opt(body, key, value.map(decimal_value));
}

// ============================================================================
// Order references
// ============================================================================

/// Identifies an existing spot order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    /// Exchange-assigned order id
    Id(String),
    /// Caller-assigned client order id
    ClientOrderId(String),
}

impl OrderRef {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn client_order_id(id: impl Into<String>) -> Self {
        Self::ClientOrderId(id.into())
    }

    /// Body field name and value
    pub fn as_field(&self) -> (&'static str, &str) {
        match self {
            Self::Id(id) => ("id", id),
            Self::ClientOrderId(id) => ("client_order_id", id),
        }
    }
}

// ============================================================================
// Spot orders
// ============================================================================

/// Spot order request
#[derive(Debug, Clone, PartialEq)]
pub struct SpotOrder {
    pub side: OrderSide,
    pub order_type: SpotOrderType,
    /// Market symbol (e.g., "SNTBTC")
    pub market: String,
    pub total_quantity: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub client_order_id: Option<String>,
    /// Exchange code, required by the batch endpoint
    pub ecode: Option<ExchangeCode>,
}

impl SpotOrder {
    /// Create an order from enum values or their raw strings
    ///
    /// # Errors
    /// `RestError::InvalidParameter` for an unknown side or order type
    pub fn new(
        side: impl IntoWire<OrderSide>,
        order_type: impl IntoWire<SpotOrderType>,
        market: impl Into<String>,
        total_quantity: Decimal,
    ) -> RestResult<Self> {
        Ok(Self {
            side: side.into_wire()?,
            order_type: order_type.into_wire()?,
            market: market.into(),
            total_quantity,
            price_per_unit: None,
            stop_price: None,
            client_order_id: None,
            ecode: None,
        })
    }

    fn typed(side: OrderSide, order_type: SpotOrderType, market: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            side,
            order_type,
            market: market.into(),
            total_quantity: quantity,
            price_per_unit: None,
            stop_price: None,
            client_order_id: None,
            ecode: None,
        }
    }

    /// Create a market order
    pub fn market(market: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::typed(side, SpotOrderType::MarketOrder, market, quantity)
    }

    /// Create a limit order
    pub fn limit(market: impl Into<String>, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self::typed(side, SpotOrderType::LimitOrder, market, quantity).with_price(price)
    }

    /// Create a stop-limit order
    pub fn stop_limit(
        market: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self::typed(side, SpotOrderType::StopLimit, market, quantity)
            .with_price(price)
            .with_stop_price(stop_price)
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price_per_unit = Some(price);
        self
    }

    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    pub fn with_ecode(mut self, ecode: impl IntoWire<ExchangeCode>) -> RestResult<Self> {
        self.ecode = Some(ecode.into_wire()?);
        Ok(self)
    }

    /// Check order-type requirements
    pub fn validate(&self) -> RestResult<()> {
        check_order(
            self.order_type.as_str(),
            self.total_quantity,
            self.order_type.requires_price(),
            self.price_per_unit.is_some(),
            self.order_type.requires_stop_price(),
            self.stop_price.is_some(),
        )
    }

    /// Validated request body
    pub fn to_body(&self) -> RestResult<Map<String, Value>> {
        self.validate()?;

        let mut body = Map::new();
        body.insert("side".into(), self.side.as_str().into());
        body.insert("order_type".into(), self.order_type.as_str().into());
        body.insert("market".into(), self.market.clone().into());
        insert_decimal(&mut body, "price_per_unit", self.price_per_unit);
        insert_decimal(&mut body, "stop_price", self.stop_price);
        body.insert("total_quantity".into(), decimal_value(self.total_quantity));
        insert_opt(&mut body, "client_order_id", self.client_order_id.clone());
        insert_opt(&mut body, "ecode", self.ecode.map(|e| e.as_str()));
        Ok(body)
    }
}

/// Filters for spot trade history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeHistoryQuery {
    pub limit: Option<u32>,
    pub from_id: Option<u64>,
    /// "asc" or "desc"
    pub sort: Option<String>,
    pub from_timestamp: Option<u64>,
    pub to_timestamp: Option<u64>,
    pub symbol: Option<String>,
}

impl TradeHistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_time_range(mut self, from_ms: u64, to_ms: u64) -> Self {
        self.from_timestamp = Some(from_ms);
        self.to_timestamp = Some(to_ms);
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn to_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        insert_opt(&mut body, "limit", self.limit);
        insert_opt(&mut body, "from_id", self.from_id);
        insert_opt(&mut body, "sort", self.sort.clone());
        insert_opt(&mut body, "from_timestamp", self.from_timestamp);
        insert_opt(&mut body, "to_timestamp", self.to_timestamp);
        insert_opt(&mut body, "symbol", self.symbol.clone());
        body
    }
}

// ============================================================================
// Margin orders
// ============================================================================

/// Margin order request
#[derive(Debug, Clone, PartialEq)]
pub struct MarginOrder {
    pub side: OrderSide,
    pub order_type: MarginOrderType,
    pub market: String,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub ecode: Option<ExchangeCode>,
    pub leverage: Option<Decimal>,
    pub target_price: Option<Decimal>,
    pub sl_price: Option<Decimal>,
    pub trailing_sl: Option<bool>,
    pub client_order_id: Option<String>,
}

impl MarginOrder {
    /// Create an order from enum values or their raw strings
    pub fn new(
        side: impl IntoWire<OrderSide>,
        order_type: impl IntoWire<MarginOrderType>,
        market: impl Into<String>,
        quantity: Decimal,
    ) -> RestResult<Self> {
        Ok(Self::typed(side.into_wire()?, order_type.into_wire()?, market, quantity))
    }

    fn typed(side: OrderSide, order_type: MarginOrderType, market: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            side,
            order_type,
            market: market.into(),
            quantity,
            price: None,
            stop_price: None,
            ecode: None,
            leverage: None,
            target_price: None,
            sl_price: None,
            trailing_sl: None,
            client_order_id: None,
        }
    }

    /// Create a market order
    pub fn market(market: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::typed(side, MarginOrderType::MarketOrder, market, quantity)
    }

    /// Create a limit order
    pub fn limit(market: impl Into<String>, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self::typed(side, MarginOrderType::LimitOrder, market, quantity).with_price(price)
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn with_ecode(mut self, ecode: impl IntoWire<ExchangeCode>) -> RestResult<Self> {
        self.ecode = Some(ecode.into_wire()?);
        Ok(self)
    }

    pub fn with_leverage(mut self, leverage: Decimal) -> Self {
        self.leverage = Some(leverage);
        self
    }

    /// Take-profit target price
    pub fn with_target_price(mut self, price: Decimal) -> Self {
        self.target_price = Some(price);
        self
    }

    /// Stop-loss price
    pub fn with_sl_price(mut self, price: Decimal) -> Self {
        self.sl_price = Some(price);
        self
    }

    pub fn with_trailing_sl(mut self, trailing: bool) -> Self {
        self.trailing_sl = Some(trailing);
        self
    }

    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    pub fn validate(&self) -> RestResult<()> {
        check_order(
            self.order_type.as_str(),
            self.quantity,
            self.order_type.requires_price(),
            self.price.is_some(),
            self.order_type.requires_stop_price(),
            self.stop_price.is_some(),
        )
    }

    pub fn to_body(&self) -> RestResult<Map<String, Value>> {
        self.validate()?;

        let mut body = Map::new();
        body.insert("side".into(), self.side.as_str().into());
        body.insert("order_type".into(), self.order_type.as_str().into());
        body.insert("market".into(), self.market.clone().into());
        insert_decimal(&mut body, "price", self.price);
        body.insert("quantity".into(), decimal_value(self.quantity));
        insert_opt(&mut body, "ecode", self.ecode.map(|e| e.as_str()));
        insert_decimal(&mut body, "leverage", self.leverage);
        insert_decimal(&mut body, "target_price", self.target_price);
        insert_decimal(&mut body, "sl_price", self.sl_price);
        insert_opt(&mut body, "trailing_sl", self.trailing_sl);
        insert_decimal(&mut body, "stop_price", self.stop_price);
        insert_opt(&mut body, "client_order_id", self.client_order_id.clone());
        Ok(body)
    }
}

/// Filters for margin order listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarginOrderQuery {
    pub market: Option<String>,
    pub details: Option<bool>,
    pub statuses: Vec<MarginOrderStatus>,
    pub size: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<String>,
}

impl MarginOrderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn with_details(mut self, details: bool) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_status(mut self, status: impl IntoWire<MarginOrderStatus>) -> RestResult<Self> {
        self.statuses.push(status.into_wire()?);
        Ok(self)
    }

    pub fn with_page(mut self, page: u32, size: u32) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn to_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        insert_opt(&mut body, "market", self.market.clone());
        insert_opt(&mut body, "details", self.details);
        if !self.statuses.is_empty() {
            body.insert("status".into(), join_wire(&self.statuses).into());
        }
        insert_opt(&mut body, "size", self.size);
        insert_opt(&mut body, "page", self.page);
        insert_opt(&mut body, "sort", self.sort.clone());
        body
    }
}

// ============================================================================
// Futures orders
// ============================================================================

/// Futures order request
#[derive(Debug, Clone, PartialEq)]
pub struct FuturesOrder {
    pub side: OrderSide,
    /// Instrument pair (e.g., "B-BTC_USDT")
    pub pair: String,
    pub order_type: FuturesOrderType,
    pub total_quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub leverage: Option<u32>,
    pub notification: Option<NotificationType>,
    pub time_in_force: Option<TimeInForce>,
    pub hidden: Option<bool>,
    pub post_only: Option<bool>,
    pub margin_currency: FuturesMarginMode,
    pub position_margin_type: Option<PositionMarginType>,
    pub take_profit_price: Option<Decimal>,
    pub stop_loss_price: Option<Decimal>,
    pub client_order_id: Option<String>,
}

impl FuturesOrder {
    /// Create an order from enum values or their raw strings
    pub fn new(
        side: impl IntoWire<OrderSide>,
        order_type: impl IntoWire<FuturesOrderType>,
        pair: impl Into<String>,
        total_quantity: Decimal,
    ) -> RestResult<Self> {
        Ok(Self::typed(side.into_wire()?, order_type.into_wire()?, pair, total_quantity))
    }

    fn typed(side: OrderSide, order_type: FuturesOrderType, pair: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            side,
            pair: pair.into(),
            order_type,
            total_quantity: quantity,
            price: None,
            stop_price: None,
            leverage: None,
            notification: None,
            time_in_force: None,
            hidden: None,
            post_only: None,
            margin_currency: FuturesMarginMode::default(),
            position_margin_type: None,
            take_profit_price: None,
            stop_loss_price: None,
            client_order_id: None,
        }
    }

    /// Create a market order
    pub fn market(pair: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::typed(side, FuturesOrderType::Market, pair, quantity)
    }

    /// Create a limit order
    pub fn limit(pair: impl Into<String>, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self::typed(side, FuturesOrderType::Limit, pair, quantity).with_price(price)
    }

    /// Create a stop-market order
    pub fn stop_market(pair: impl Into<String>, side: OrderSide, quantity: Decimal, stop_price: Decimal) -> Self {
        Self::typed(side, FuturesOrderType::StopMarket, pair, quantity).with_stop_price(stop_price)
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn with_leverage(mut self, leverage: u32) -> Self {
        self.leverage = Some(leverage);
        self
    }

    pub fn with_notification(mut self, notification: impl IntoWire<NotificationType>) -> RestResult<Self> {
        self.notification = Some(notification.into_wire()?);
        Ok(self)
    }

    pub fn with_time_in_force(mut self, tif: impl IntoWire<TimeInForce>) -> RestResult<Self> {
        self.time_in_force = Some(tif.into_wire()?);
        Ok(self)
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    /// Set as post-only (maker only)
    pub fn with_post_only(mut self, post_only: bool) -> Self {
        self.post_only = Some(post_only);
        self
    }

    pub fn with_margin_currency(mut self, margin: impl IntoWire<FuturesMarginMode>) -> RestResult<Self> {
        self.margin_currency = margin.into_wire()?;
        Ok(self)
    }

    pub fn with_position_margin_type(mut self, kind: impl IntoWire<PositionMarginType>) -> RestResult<Self> {
        self.position_margin_type = Some(kind.into_wire()?);
        Ok(self)
    }

    pub fn with_take_profit(mut self, price: Decimal) -> Self {
        self.take_profit_price = Some(price);
        self
    }

    pub fn with_stop_loss(mut self, price: Decimal) -> Self {
        self.stop_loss_price = Some(price);
        self
    }

    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    pub fn validate(&self) -> RestResult<()> {
        check_order(
            self.order_type.as_str(),
            self.total_quantity,
            self.order_type.requires_price(),
            self.price.is_some(),
            self.order_type.requires_stop_price(),
            self.stop_price.is_some(),
        )
    }

    /// The order object, without the `{"order": ...}` wrapper
    pub fn to_order_object(&self) -> RestResult<Map<String, Value>> {
        self.validate()?;

        let mut order = Map::new();
        order.insert("side".into(), self.side.as_str().into());
        order.insert("pair".into(), self.pair.clone().into());
        order.insert("order_type".into(), self.order_type.as_str().into());
        insert_decimal(&mut order, "price", self.price);
        insert_decimal(&mut order, "stop_price", self.stop_price);
        order.insert("total_quantity".into(), decimal_value(self.total_quantity));
        insert_opt(&mut order, "leverage", self.leverage);
        insert_opt(&mut order, "notification", self.notification.map(|n| n.as_str()));
        insert_opt(&mut order, "time_in_force", self.time_in_force.map(|t| t.as_str()));
        insert_opt(&mut order, "hidden", self.hidden);
        insert_opt(&mut order, "post_only", self.post_only);
        order.insert(
            "margin_currency_short_name".into(),
            self.margin_currency.as_str().into(),
        );
        insert_opt(
            &mut order,
            "position_margin_type",
            self.position_margin_type.map(|m| m.as_str()),
        );
        insert_decimal(&mut order, "take_profit_price", self.take_profit_price);
        insert_decimal(&mut order, "stop_loss_price", self.stop_loss_price);
        insert_opt(&mut order, "client_order_id", self.client_order_id.clone());
        Ok(order)
    }

    /// Validated request body: `{"order": {...}}`
    pub fn to_body(&self) -> RestResult<Map<String, Value>> {
        let mut body = Map::new();
        body.insert("order".into(), Value::Object(self.to_order_object()?));
        Ok(body)
    }
}

/// Changes to an open futures order
#[derive(Debug, Clone, PartialEq)]
pub struct FuturesOrderEdit {
    pub id: String,
    pub total_quantity: Decimal,
    pub price: Decimal,
    pub take_profit_price: Option<Decimal>,
    pub stop_loss_price: Option<Decimal>,
}

impl FuturesOrderEdit {
    pub fn new(id: impl Into<String>, total_quantity: Decimal, price: Decimal) -> Self {
        Self {
            id: id.into(),
            total_quantity,
            price,
            take_profit_price: None,
            stop_loss_price: None,
        }
    }

    pub fn with_take_profit(mut self, price: Decimal) -> Self {
        self.take_profit_price = Some(price);
        self
    }

    pub fn with_stop_loss(mut self, price: Decimal) -> Self {
        self.stop_loss_price = Some(price);
        self
    }

    pub fn to_body(&self) -> RestResult<Map<String, Value>> {
        if self.total_quantity <= Decimal::ZERO {
            return Err(RestError::InvalidOrder(format!(
                "quantity must be positive, got {}",
                self.total_quantity
            )));
        }
        let mut body = Map::new();
        body.insert("id".into(), self.id.clone().into());
        body.insert("total_quantity".into(), decimal_value(self.total_quantity));
        body.insert("price".into(), decimal_value(self.price));
        insert_decimal(&mut body, "take_profit_price", self.take_profit_price);
        insert_decimal(&mut body, "stop_loss_price", self.stop_loss_price);
        Ok(body)
    }
}

/// Take-profit or stop-loss leg attached to a futures position
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerOrder {
    pub order_type: FuturesOrderType,
    pub stop_price: Decimal,
    pub limit_price: Option<Decimal>,
}

impl TriggerOrder {
    pub fn new(order_type: impl IntoWire<FuturesOrderType>, stop_price: Decimal) -> RestResult<Self> {
        Ok(Self {
            order_type: order_type.into_wire()?,
            stop_price,
            limit_price: None,
        })
    }

    pub fn take_profit_market(stop_price: Decimal) -> Self {
        Self {
            order_type: FuturesOrderType::TakeProfitMarket,
            stop_price,
            limit_price: None,
        }
    }

    pub fn take_profit_limit(stop_price: Decimal, limit_price: Decimal) -> Self {
        Self {
            order_type: FuturesOrderType::TakeProfitLimit,
            stop_price,
            limit_price: Some(limit_price),
        }
    }

    pub fn stop_market(stop_price: Decimal) -> Self {
        Self {
            order_type: FuturesOrderType::StopMarket,
            stop_price,
            limit_price: None,
        }
    }

    pub fn stop_limit(stop_price: Decimal, limit_price: Decimal) -> Self {
        Self {
            order_type: FuturesOrderType::StopLimit,
            stop_price,
            limit_price: Some(limit_price),
        }
    }

    pub fn with_limit_price(mut self, price: Decimal) -> Self {
        self.limit_price = Some(price);
        self
    }

    pub fn to_value(&self) -> RestResult<Value> {
        if !self.order_type.requires_stop_price() {
            return Err(RestError::InvalidOrder(format!(
                "{} is not a trigger order type",
                self.order_type
            )));
        }
        if self.order_type.requires_price() && self.limit_price.is_none() {
            return Err(RestError::InvalidOrder(format!(
                "{} order requires a limit price",
                self.order_type
            )));
        }

        let mut leg = Map::new();
        leg.insert("stop_price".into(), decimal_value(self.stop_price));
        insert_decimal(&mut leg, "limit_price", self.limit_price);
        leg.insert("order_type".into(), self.order_type.as_str().into());
        Ok(Value::Object(leg))
    }
}

// ============================================================================
// Futures queries
// ============================================================================

/// Filters for futures order listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuturesOrderQuery {
    pub statuses: Vec<FuturesOrderStatus>,
    pub side: Option<OrderSide>,
    pub page: u32,
    pub size: u32,
    pub margin_currencies: Vec<FuturesMarginMode>,
}

impl Default for FuturesOrderQuery {
    fn default() -> Self {
        Self {
            statuses: Vec::new(),
            side: None,
            page: 1,
            size: 10,
            margin_currencies: Vec::new(),
        }
    }
}

impl FuturesOrderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl IntoWire<FuturesOrderStatus>) -> RestResult<Self> {
        self.statuses.push(status.into_wire()?);
        Ok(self)
    }

    pub fn with_side(mut self, side: impl IntoWire<OrderSide>) -> RestResult<Self> {
        self.side = Some(side.into_wire()?);
        Ok(self)
    }

    pub fn with_page(mut self, page: u32, size: u32) -> Self {
        self.page = page;
        self.size = size;
        self
    }

    pub fn with_margin_currency(mut self, margin: impl IntoWire<FuturesMarginMode>) -> RestResult<Self> {
        self.margin_currencies.push(margin.into_wire()?);
        Ok(self)
    }

    pub fn to_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        if !self.statuses.is_empty() {
            body.insert("status".into(), join_wire(&self.statuses).into());
        }
        insert_opt(&mut body, "side", self.side.map(|s| s.as_str()));
        body.insert("page".into(), self.page.into());
        body.insert("size".into(), self.size.into());
        body.insert(
            "margin_currency_short_name".into(),
            margin_list(&self.margin_currencies),
        );
        body
    }
}

/// Filters for futures positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionFilter {
    pub page: u32,
    pub size: u32,
    pub pairs: Vec<String>,
    pub position_ids: Vec<String>,
    pub margin_currencies: Vec<FuturesMarginMode>,
}

impl Default for PositionFilter {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            pairs: Vec::new(),
            position_ids: Vec::new(),
            margin_currencies: Vec::new(),
        }
    }
}

impl PositionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pairs.push(pair.into());
        self
    }

    pub fn with_position_id(mut self, id: impl Into<String>) -> Self {
        self.position_ids.push(id.into());
        self
    }

    pub fn with_page(mut self, page: u32, size: u32) -> Self {
        self.page = page;
        self.size = size;
        self
    }

    pub fn with_margin_currency(mut self, margin: impl IntoWire<FuturesMarginMode>) -> RestResult<Self> {
        self.margin_currencies.push(margin.into_wire()?);
        Ok(self)
    }

    pub fn to_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("page".into(), self.page.into());
        body.insert("size".into(), self.size.into());
        if !self.pairs.is_empty() {
            body.insert("pairs".into(), self.pairs.join(",").into());
        }
        if !self.position_ids.is_empty() {
            body.insert("position_ids".into(), self.position_ids.join(",").into());
        }
        body.insert(
            "margin_currency_short_name".into(),
            margin_list(&self.margin_currencies),
        );
        body
    }
}

/// Filters for futures position transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuturesTransactionQuery {
    pub position_ids: Vec<String>,
    /// "all", "default", "funding", ...
    pub stage: String,
    pub page: u32,
    pub size: u32,
    pub margin_currencies: Vec<FuturesMarginMode>,
}

impl Default for FuturesTransactionQuery {
    fn default() -> Self {
        Self {
            position_ids: Vec::new(),
            stage: "all".to_string(),
            page: 1,
            size: 10,
            margin_currencies: Vec::new(),
        }
    }
}

impl FuturesTransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position_id(mut self, id: impl Into<String>) -> Self {
        self.position_ids.push(id.into());
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    pub fn with_page(mut self, page: u32, size: u32) -> Self {
        self.page = page;
        self.size = size;
        self
    }

    pub fn with_margin_currency(mut self, margin: impl IntoWire<FuturesMarginMode>) -> RestResult<Self> {
        self.margin_currencies.push(margin.into_wire()?);
        Ok(self)
    }

    pub fn to_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        if !self.position_ids.is_empty() {
            body.insert("position_ids".into(), self.position_ids.join(",").into());
        }
        body.insert("stage".into(), self.stage.clone().into());
        body.insert("page".into(), self.page.into());
        body.insert("size".into(), self.size.into());
        body.insert(
            "margin_currency_short_name".into(),
            margin_list(&self.margin_currencies),
        );
        body
    }
}

/// Filters for futures trade history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuturesTradeQuery {
    pub pair: Option<String>,
    pub order_id: Option<String>,
    /// Inclusive start date, "YYYY-MM-DD"
    pub from_date: Option<String>,
    /// Inclusive end date, "YYYY-MM-DD"
    pub to_date: Option<String>,
    pub page: u32,
    pub size: u32,
    pub margin_currencies: Vec<FuturesMarginMode>,
}

impl Default for FuturesTradeQuery {
    fn default() -> Self {
        Self {
            pair: None,
            order_id: None,
            from_date: None,
            to_date: None,
            page: 1,
            size: 10,
            margin_currencies: Vec::new(),
        }
    }
}

impl FuturesTradeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn with_order_id(mut self, id: impl Into<String>) -> Self {
        self.order_id = Some(id.into());
        self
    }

    pub fn with_dates(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_date = Some(from.into());
        self.to_date = Some(to.into());
        self
    }

    pub fn with_page(mut self, page: u32, size: u32) -> Self {
        self.page = page;
        self.size = size;
        self
    }

    pub fn with_margin_currency(mut self, margin: impl IntoWire<FuturesMarginMode>) -> RestResult<Self> {
        self.margin_currencies.push(margin.into_wire()?);
        Ok(self)
    }

    pub fn to_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        insert_opt(&mut body, "pair", self.pair.clone());
        insert_opt(&mut body, "order_id", self.order_id.clone());
        insert_opt(&mut body, "from_date", self.from_date.clone());
        insert_opt(&mut body, "to_date", self.to_date.clone());
        body.insert("page".into(), self.page.into());
        body.insert("size".into(), self.size.into());
        body.insert(
            "margin_currency_short_name".into(),
            margin_list(&self.margin_currencies),
        );
        body
    }
}
