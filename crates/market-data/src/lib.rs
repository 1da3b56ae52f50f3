//! Unistock Market Data Crate
//!
//! Live market data for markets that have no persisted records.
//!
//! # Overview
//!
//! - Raw upstream access through the [`TickerSource`] trait ([`YahooClient`])
//! - Market-level providers through the [`LiveMarketProvider`] trait
//!   ([`BursaProvider`] for Bursa Malaysia)
//! - A JSON file cache and a cooldown limiter owned by each provider instance
//! - Runtime settings lookup layered over environment and a settings store
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   Query Facade   |  (unistock-core)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! | LiveMarketProvider| -> | FileCache/Cooldown|
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |   TickerSource   |  (Yahoo Finance)
//! +------------------+
//! ```

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod settings;

pub use cache::{CacheEntry, FileCache};
pub use errors::MarketDataError;
pub use models::{DirectoryEntry, HistoryBar, SeriesRow, TickerInfo, TickerSummary};
pub use provider::bursa::{BursaProvider, BursaProviderConfig};
pub use provider::yahoo::YahooClient;
pub use provider::{LiveMarketProvider, TickerSource};
pub use registry::Cooldown;
pub use resolver::{normalize_bursa_symbol, strip_bursa_suffix, BURSA_SUFFIX};
pub use settings::{EnvSettingsReader, LayeredSettings, SettingsReader};
