//! Live market data providers.
//!
//! - [`TickerSource`]: raw upstream access, implemented by [`yahoo::YahooClient`]
//! - [`LiveMarketProvider`]: market-level provider, implemented by
//!   [`bursa::BursaProvider`]

mod traits;

pub mod bursa;
pub mod yahoo;

pub use traits::{LiveMarketProvider, TickerSource};
