//! Storage traits for stock documents and source-priority configuration.
//!
//! These traits abstract the persistence layer. The SQLite implementations
//! live in the `storage-sqlite` crate; tests use in-memory mocks.

use async_trait::async_trait;

use super::model::{DailyBar, DailyBarQuery, InstrumentRecord, QuoteRecord, SourcePriorityEntry};
use super::search::SearchPattern;
use crate::errors::Result;

/// Read access to per-market document collections.
///
/// Collection names come from [`collection_name`](crate::markets::collection_name).
/// Internal identifiers are never part of returned records.
#[async_trait]
pub trait StockDocumentStore: Send + Sync {
    /// First instrument record with `code`, restricted to `source` when given.
    async fn find_instrument(
        &self,
        collection: &str,
        code: &str,
        source: Option<&str>,
    ) -> Result<Option<InstrumentRecord>>;

    /// Every instrument record whose code, name or English name matches.
    ///
    /// Records come back in storage order, duplicates across sources included.
    async fn search_instruments(
        &self,
        collection: &str,
        pattern: &SearchPattern,
    ) -> Result<Vec<InstrumentRecord>>;

    /// First quote record with `code`, regardless of source.
    async fn find_quote(&self, collection: &str, code: &str) -> Result<Option<QuoteRecord>>;

    /// Daily bars for the query's code within its inclusive date range,
    /// newest first, at most `limit` of them.
    async fn find_daily_bars(&self, collection: &str, query: &DailyBarQuery)
        -> Result<Vec<DailyBar>>;
}

/// Read access to the source-priority groupings.
#[async_trait]
pub trait SourcePriorityStore: Send + Sync {
    /// Enabled entries for `market_category`, highest priority first.
    async fn enabled_entries(&self, market_category: &str) -> Result<Vec<SourcePriorityEntry>>;
}
