//! Unified cross-market stock queries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, error, info};
use unistock_market_data::{LiveMarketProvider, TickerInfo};

use super::adapters::{
    directory_to_instrument, info_to_instrument, info_to_quote, series_to_daily_bars, LiveLookup,
    UnavailableReason,
};
use super::model::{DailyBar, DailyBarQuery, InstrumentRecord, QuoteRecord};
use super::priority::SourcePriorityResolver;
use super::search::{dedup_by_source_priority, SearchPattern, SourceRanking};
use super::store::{SourcePriorityStore, StockDocumentStore};
use crate::errors::Result;
use crate::markets::{collection_name, Market, MarketDescriptor, RecordKind};

/// Read operations over every supported market.
///
/// Store failures propagate as errors. Live provider failures are logged and
/// surface as `None` or an empty list.
#[async_trait]
pub trait UnifiedStockServiceTrait: Send + Sync {
    /// Basic info for `code`.
    ///
    /// With an explicit `source` only that source's record is considered.
    /// Otherwise sources are tried in priority order, then any record for
    /// the code regardless of source.
    async fn get_stock_info(
        &self,
        market: Market,
        code: &str,
        source: Option<&str>,
    ) -> Result<Option<InstrumentRecord>>;

    /// Latest quote for `code`.
    async fn get_stock_quote(&self, market: Market, code: &str) -> Result<Option<QuoteRecord>>;

    /// Instruments matching `query`, one record per code.
    async fn search_stocks(
        &self,
        market: Market,
        query: &str,
        limit: usize,
    ) -> Result<Vec<InstrumentRecord>>;

    /// Daily bars for `code`, newest first.
    async fn get_daily_quotes(
        &self,
        market: Market,
        code: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        limit: usize,
    ) -> Result<Vec<DailyBar>>;

    /// Descriptors of all supported markets.
    fn get_supported_markets(&self) -> Vec<MarketDescriptor>;

    /// Ordered source list used for `market`.
    async fn resolve_priority(&self, market: Market) -> Vec<String>;
}

/// Default [`UnifiedStockServiceTrait`] implementation.
pub struct UnifiedStockService {
    documents: Arc<dyn StockDocumentStore>,
    resolver: SourcePriorityResolver,
    live: Arc<dyn LiveMarketProvider>,
}

impl UnifiedStockService {
    pub fn new(
        documents: Arc<dyn StockDocumentStore>,
        priorities: Arc<dyn SourcePriorityStore>,
        live: Arc<dyn LiveMarketProvider>,
    ) -> Self {
        Self {
            documents,
            resolver: SourcePriorityResolver::new(priorities),
            live,
        }
    }

    pub fn resolver(&self) -> &SourcePriorityResolver {
        &self.resolver
    }

    // =========================================================================
    // Malaysia (live provider)
    // =========================================================================

    pub async fn my_stock_info(&self, code: &str) -> LiveLookup<InstrumentRecord> {
        self.fetch_live_info(code).await.map(|info| info_to_instrument(&info))
    }

    pub async fn my_stock_quote(&self, code: &str) -> LiveLookup<QuoteRecord> {
        self.fetch_live_info(code).await.map(|info| info_to_quote(&info))
    }

    pub async fn my_daily_quotes(
        &self,
        code: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        limit: usize,
    ) -> LiveLookup<Vec<DailyBar>> {
        match self.live.fetch_series(code, start, end).await {
            Ok(rows) if rows.is_empty() => LiveLookup::Found(Vec::new()),
            Ok(rows) => LiveLookup::Found(series_to_daily_bars(code, rows, limit)),
            Err(e) => {
                error!("Failed to fetch MY daily quotes for {}: {}", code, e);
                LiveLookup::Unavailable(UnavailableReason::Provider(e.to_string()))
            }
        }
    }

    pub fn my_search(&self, query: &str, limit: usize) -> Vec<InstrumentRecord> {
        let results: Vec<InstrumentRecord> = self
            .live
            .search_directory(query, limit)
            .iter()
            .map(directory_to_instrument)
            .collect();
        info!("Search MY '{}' -> {} results", query, results.len());
        results
    }

    async fn fetch_live_info(&self, code: &str) -> LiveLookup<TickerInfo> {
        match self.live.fetch_info(code).await {
            Ok(Some(info)) => LiveLookup::Found(info),
            Ok(None) => {
                debug!("MY provider has no info for {}", code);
                LiveLookup::Unavailable(UnavailableReason::NotFound)
            }
            Err(e) => {
                error!("Failed to fetch MY stock info for {}: {}", code, e);
                LiveLookup::Unavailable(UnavailableReason::Provider(e.to_string()))
            }
        }
    }

    // =========================================================================
    // Document store markets
    // =========================================================================

    async fn find_by_priority(
        &self,
        market: Market,
        collection: &str,
        code: &str,
    ) -> Result<Option<InstrumentRecord>> {
        for source in self.resolver.resolve(market).await {
            if let Some(record) = self
                .documents
                .find_instrument(collection, code, Some(&source))
                .await?
            {
                debug!("{} {} resolved from source {}", market, code, source);
                return Ok(Some(record));
            }
        }

        let legacy = self.documents.find_instrument(collection, code, None).await?;
        if legacy.is_some() {
            debug!("{} {} resolved without source", market, code);
        }
        Ok(legacy)
    }
}

#[async_trait]
impl UnifiedStockServiceTrait for UnifiedStockService {
    async fn get_stock_info(
        &self,
        market: Market,
        code: &str,
        source: Option<&str>,
    ) -> Result<Option<InstrumentRecord>> {
        if market.is_live() {
            return Ok(self.my_stock_info(code).await.into_option());
        }

        let collection = collection_name(market, RecordKind::BasicInfo);
        // A blank source means "any source".
        match source.filter(|s| !s.trim().is_empty()) {
            Some(source) => {
                self.documents
                    .find_instrument(collection, code, Some(source))
                    .await
            }
            None => self.find_by_priority(market, collection, code).await,
        }
    }

    async fn get_stock_quote(&self, market: Market, code: &str) -> Result<Option<QuoteRecord>> {
        if market.is_live() {
            return Ok(self.my_stock_quote(code).await.into_option());
        }

        let collection = collection_name(market, RecordKind::Quotes);
        self.documents.find_quote(collection, code).await
    }

    async fn search_stocks(
        &self,
        market: Market,
        query: &str,
        limit: usize,
    ) -> Result<Vec<InstrumentRecord>> {
        if market.is_live() {
            return Ok(self.my_search(query, limit));
        }

        let collection = collection_name(market, RecordKind::BasicInfo);
        let pattern = SearchPattern::new(query);
        let matches = self.documents.search_instruments(collection, &pattern).await?;
        if matches.is_empty() {
            return Ok(Vec::new());
        }

        let ranking = SourceRanking::new(&self.resolver.resolve(market).await);
        let mut results = dedup_by_source_priority(matches, &ranking);
        results.truncate(limit);

        info!("Search {} '{}' -> {} results (deduplicated)", market, query, results.len());
        Ok(results)
    }

    async fn get_daily_quotes(
        &self,
        market: Market,
        code: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        limit: usize,
    ) -> Result<Vec<DailyBar>> {
        if market.is_live() {
            return Ok(self
                .my_daily_quotes(code, start, end, limit)
                .await
                .into_option()
                .unwrap_or_default());
        }

        let collection = collection_name(market, RecordKind::Daily);
        let query = DailyBarQuery {
            code: code.to_string(),
            start,
            end,
            limit,
        };
        self.documents.find_daily_bars(collection, &query).await
    }

    fn get_supported_markets(&self) -> Vec<MarketDescriptor> {
        Market::ALL.iter().map(|m| m.descriptor()).collect()
    }

    async fn resolve_priority(&self, market: Market) -> Vec<String> {
        self.resolver.resolve(market).await
    }
}
