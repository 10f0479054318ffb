//! Order, market data and futures enums

use serde::{Deserialize, Serialize};

use crate::wire::{wire_conversions, WireEnum};

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl WireEnum for OrderSide {
    const FIELD: &'static str = "side";
    const ALL: &'static [Self] = &[Self::Buy, Self::Sell];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl OrderSide {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Spot order types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotOrderType {
    /// Market order - executes immediately at best available price
    MarketOrder,
    /// Limit order - executes at specified price or better
    LimitOrder,
    /// Stop-limit order - places a limit order once the stop price trades
    StopLimit,
    /// Take-profit order
    TakeProfit,
}

impl WireEnum for SpotOrderType {
    const FIELD: &'static str = "order_type";
    const ALL: &'static [Self] = &[
        Self::MarketOrder,
        Self::LimitOrder,
        Self::StopLimit,
        Self::TakeProfit,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::MarketOrder => "market_order",
            Self::LimitOrder => "limit_order",
            Self::StopLimit => "stop_limit",
            Self::TakeProfit => "take_profit",
        }
    }
}

impl SpotOrderType {
    /// Returns true if orders of this type must carry a limit price
    pub fn requires_price(&self) -> bool {
        matches!(self, Self::LimitOrder | Self::StopLimit | Self::TakeProfit)
    }

    /// Returns true if orders of this type must carry a stop/trigger price
    pub fn requires_stop_price(&self) -> bool {
        matches!(self, Self::StopLimit | Self::TakeProfit)
    }
}

/// Margin order types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginOrderType {
    /// Market order
    MarketOrder,
    /// Limit order
    LimitOrder,
    /// Stop-limit order
    StopLimit,
    /// Take-profit order
    TakeProfit,
}

impl WireEnum for MarginOrderType {
    const FIELD: &'static str = "order_type";
    const ALL: &'static [Self] = &[
        Self::MarketOrder,
        Self::LimitOrder,
        Self::StopLimit,
        Self::TakeProfit,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::MarketOrder => "market_order",
            Self::LimitOrder => "limit_order",
            Self::StopLimit => "stop_limit",
            Self::TakeProfit => "take_profit",
        }
    }
}

impl MarginOrderType {
    /// Returns true if orders of this type must carry a limit price
    pub fn requires_price(&self) -> bool {
        matches!(self, Self::LimitOrder | Self::StopLimit | Self::TakeProfit)
    }

    /// Returns true if orders of this type must carry a stop/trigger price
    pub fn requires_stop_price(&self) -> bool {
        matches!(self, Self::StopLimit | Self::TakeProfit)
    }
}

/// Futures order types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuturesOrderType {
    /// Market order
    Market,
    /// Limit order
    Limit,
    /// Stop-limit order
    StopLimit,
    /// Stop-market order
    StopMarket,
    /// Take-profit limit order
    TakeProfitLimit,
    /// Take-profit market order
    TakeProfitMarket,
}

impl WireEnum for FuturesOrderType {
    const FIELD: &'static str = "order_type";
    const ALL: &'static [Self] = &[
        Self::Market,
        Self::Limit,
        Self::StopLimit,
        Self::StopMarket,
        Self::TakeProfitLimit,
        Self::TakeProfitMarket,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::StopLimit => "stop_limit",
            Self::StopMarket => "stop_market",
            Self::TakeProfitLimit => "take_profit_limit",
            Self::TakeProfitMarket => "take_profit_market",
        }
    }
}

impl FuturesOrderType {
    /// Returns true if orders of this type must carry a limit price
    pub fn requires_price(&self) -> bool {
        matches!(self, Self::Limit | Self::StopLimit | Self::TakeProfitLimit)
    }

    /// Returns true if orders of this type must carry a stop/trigger price
    pub fn requires_stop_price(&self) -> bool {
        matches!(
            self,
            Self::StopLimit | Self::StopMarket | Self::TakeProfitLimit | Self::TakeProfitMarket
        )
    }
}

/// Spot order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Init,
    Open,
    PartiallyFilled,
    Filled,
    PartiallyCancelled,
    Cancelled,
    Rejected,
}

impl WireEnum for OrderStatus {
    const FIELD: &'static str = "status";
    const ALL: &'static [Self] = &[
        Self::Init,
        Self::Open,
        Self::PartiallyFilled,
        Self::Filled,
        Self::PartiallyCancelled,
        Self::Cancelled,
        Self::Rejected,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Open => "open",
            Self::PartiallyFilled => "partially_filled",
            Self::Filled => "filled",
            Self::PartiallyCancelled => "partially_cancelled",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }
}

/// Margin order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginOrderStatus {
    Init,
    Open,
    PartialEntry,
    PartialClose,
    Cancelled,
    Rejected,
    Close,
    Triggered,
}

impl WireEnum for MarginOrderStatus {
    const FIELD: &'static str = "status";
    const ALL: &'static [Self] = &[
        Self::Init,
        Self::Open,
        Self::PartialEntry,
        Self::PartialClose,
        Self::Cancelled,
        Self::Rejected,
        Self::Close,
        Self::Triggered,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Open => "open",
            Self::PartialEntry => "partial_entry",
            Self::PartialClose => "partial_close",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
            Self::Close => "close",
            Self::Triggered => "triggered",
        }
    }
}

/// Futures order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuturesOrderStatus {
    Open,
    Filled,
    PartiallyFilled,
    PartiallyCancelled,
    Cancelled,
    Rejected,
    Untriggered,
}

impl WireEnum for FuturesOrderStatus {
    const FIELD: &'static str = "status";
    const ALL: &'static [Self] = &[
        Self::Open,
        Self::Filled,
        Self::PartiallyFilled,
        Self::PartiallyCancelled,
        Self::Cancelled,
        Self::Rejected,
        Self::Untriggered,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Filled => "filled",
            Self::PartiallyFilled => "partially_filled",
            Self::PartiallyCancelled => "partially_cancelled",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
            Self::Untriggered => "untriggered",
        }
    }
}

/// Time in force for futures orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInForce {
    /// Rests on the book until filled or cancelled
    GoodTillCancel,
    /// Fills what it can immediately, cancels the rest
    ImmediateOrCancel,
    /// Fills completely or not at all
    FillOrKill,
}

impl WireEnum for TimeInForce {
    const FIELD: &'static str = "time_in_force";
    const ALL: &'static [Self] = &[
        Self::GoodTillCancel,
        Self::ImmediateOrCancel,
        Self::FillOrKill,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::GoodTillCancel => "good_till_cancel",
            Self::ImmediateOrCancel => "immediate_or_cancel",
            Self::FillOrKill => "fill_or_kill",
        }
    }
}

/// Exchange codes used as market prefixes (e.g. "B-BTC_USDT")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeCode {
    #[serde(rename = "I")]
    CoinDcxInr,
    #[serde(rename = "B")]
    Binance,
    #[serde(rename = "HB")]
    Huobi,
    #[serde(rename = "KC")]
    Kucoin,
}

impl WireEnum for ExchangeCode {
    const FIELD: &'static str = "ecode";
    const ALL: &'static [Self] = &[Self::CoinDcxInr, Self::Binance, Self::Huobi, Self::Kucoin];

    fn as_str(&self) -> &'static str {
        match self {
            Self::CoinDcxInr => "I",
            Self::Binance => "B",
            Self::Huobi => "HB",
            Self::Kucoin => "KC",
        }
    }
}

/// Spot candlestick intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandleInterval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl WireEnum for CandleInterval {
    const FIELD: &'static str = "interval";
    const ALL: &'static [Self] = &[
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
        Self::FourHours,
        Self::SixHours,
        Self::EightHours,
        Self::OneDay,
        Self::ThreeDays,
        Self::OneWeek,
        Self::OneMonth,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::TwoHours => "2h",
            Self::FourHours => "4h",
            Self::SixHours => "6h",
            Self::EightHours => "8h",
            Self::OneDay => "1d",
            Self::ThreeDays => "3d",
            Self::OneWeek => "1w",
            Self::OneMonth => "1M",
        }
    }
}

/// Futures candlestick resolutions
///
/// Futures candles use their own resolution codes and second-based timestamps,
/// unlike the spot `CandleInterval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuturesResolution {
    #[serde(rename = "1")]
    OneMinute,
    #[serde(rename = "5")]
    FiveMinutes,
    #[serde(rename = "60")]
    OneHour,
    #[serde(rename = "1D")]
    OneDay,
}

impl WireEnum for FuturesResolution {
    const FIELD: &'static str = "resolution";
    const ALL: &'static [Self] = &[
        Self::OneMinute,
        Self::FiveMinutes,
        Self::OneHour,
        Self::OneDay,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1",
            Self::FiveMinutes => "5",
            Self::OneHour => "60",
            Self::OneDay => "1D",
        }
    }
}

/// Currency that denominates futures margin and settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FuturesMarginMode {
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "USDT")]
    #[default]
    Usdt,
}

impl WireEnum for FuturesMarginMode {
    const FIELD: &'static str = "margin_currency_short_name";
    const ALL: &'static [Self] = &[Self::Inr, Self::Usdt];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usdt => "USDT",
        }
    }
}

/// Position margin type for futures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMarginType {
    /// Margin is ring-fenced per position
    Isolated,
    /// Margin is shared across positions
    Crossed,
}

impl WireEnum for PositionMarginType {
    const FIELD: &'static str = "margin_type";
    const ALL: &'static [Self] = &[Self::Isolated, Self::Crossed];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Isolated => "isolated",
            Self::Crossed => "crossed",
        }
    }
}

/// Notification preference attached to futures orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NoNotification,
    EmailNotification,
    PushNotification,
}

impl WireEnum for NotificationType {
    const FIELD: &'static str = "notification";
    const ALL: &'static [Self] = &[
        Self::NoNotification,
        Self::EmailNotification,
        Self::PushNotification,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::NoNotification => "no_notification",
            Self::EmailNotification => "email_notification",
            Self::PushNotification => "push_notification",
        }
    }
}

/// Depth of the futures orderbook snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderbookDepth {
    #[serde(rename = "10")]
    D10,
    #[serde(rename = "20")]
    D20,
    #[serde(rename = "50")]
    #[default]
    D50,
}

impl WireEnum for OrderbookDepth {
    const FIELD: &'static str = "depth";
    const ALL: &'static [Self] = &[Self::D10, Self::D20, Self::D50];

    fn as_str(&self) -> &'static str {
        match self {
            Self::D10 => "10",
            Self::D20 => "20",
            Self::D50 => "50",
        }
    }
}

wire_conversions!(
    OrderSide,
    SpotOrderType,
    MarginOrderType,
    FuturesOrderType,
    OrderStatus,
    MarginOrderStatus,
    FuturesOrderStatus,
    TimeInForce,
    ExchangeCode,
    CandleInterval,
    FuturesResolution,
    FuturesMarginMode,
    PositionMarginType,
    NotificationType,
    OrderbookDepth,
);
