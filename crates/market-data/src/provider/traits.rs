//! Provider trait definitions.
//!
//! Two seams live here. [`TickerSource`] is the raw upstream (Yahoo in
//! production, a fake in tests). [`LiveMarketProvider`] is what callers in
//! the query layer talk to: a market-specific provider that normalizes
//! symbols, resolves names and paces its upstream calls.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::{DirectoryEntry, HistoryBar, SeriesRow, TickerInfo, TickerSummary};

/// Raw per-symbol market data from an upstream API.
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Unique identifier for this upstream (e.g., "YAHOO").
    fn id(&self) -> &'static str;

    /// Fetch the current summary snapshot for `symbol`.
    ///
    /// Returns `SymbolNotFound` when the upstream has no such ticker.
    async fn ticker_summary(&self, symbol: &str) -> Result<TickerSummary, MarketDataError>;

    /// Fetch daily bars for `symbol` between `start` and `end` (both inclusive).
    ///
    /// Bars may come back in any order.
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoryBar>, MarketDataError>;
}

/// A live provider for a market that has no persisted records.
#[async_trait]
pub trait LiveMarketProvider: Send + Sync {
    /// Unique identifier for this provider.
    fn id(&self) -> &'static str;

    /// Instrument info for `code`, or `None` when the upstream does not know it.
    async fn fetch_info(&self, code: &str) -> Result<Option<TickerInfo>, MarketDataError>;

    /// Daily series for `code`, ascending by date with change columns derived.
    ///
    /// A missing `end` means today and a missing `start` means one year
    /// before today, so an old `end` without `start` is an empty range. An unknown symbol or empty range yields an empty vector.
    async fn fetch_series(
        &self,
        code: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<SeriesRow>, MarketDataError>;

    /// Offline search over the provider's built-in directory.
    fn search_directory(&self, query: &str, limit: usize) -> Vec<DirectoryEntry>;
}
