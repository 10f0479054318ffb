//! Shared wire types for the CoinDCX REST API
//!
//! This crate holds the closed sets of raw values the exchange accepts for
//! enum-like request fields, plus the normalization that turns either an enum
//! value or its raw string into the canonical wire string.
//!
//! # Key Types
//!
//! - [`OrderSide`], [`SpotOrderType`], [`MarginOrderType`], [`FuturesOrderType`] - Order enums
//! - [`TimeInForce`], [`FuturesMarginMode`], [`PositionMarginType`] - Futures order options
//! - [`CandleInterval`], [`FuturesResolution`] - Candle granularity
//! - [`WireEnum`], [`IntoWire`] - Enum-or-raw-string normalization
//! - [`TypesError`] - Error types

pub mod enums;
pub mod error;
pub mod wire;

pub use enums::*;
pub use error::*;
pub use wire::*;
