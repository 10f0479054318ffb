//! API endpoint implementations

pub mod futures;
pub mod margin;
pub mod market;
pub mod spot;

pub use futures::FuturesEndpoints;
pub use margin::MarginEndpoints;
pub use market::MarketEndpoints;
pub use spot::SpotEndpoints;
