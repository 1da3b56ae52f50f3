//! Tests for UnifiedStockService contracts and edge cases.
//!
//! # Contract Points
//!
//! 1. Info lookup: an explicit source never falls back; otherwise sources are
//!    tried in resolved priority order, then without a source
//! 2. Search: one record per code, the better-ranked source wins
//! 3. Daily bars: newest first, never more than `limit`
//! 4. Malaysia: served by the live provider only, failures become empty results

#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Result};
    use crate::markets::Market;
    use crate::stocks::{
        adapters::{LiveLookup, UnavailableReason},
        model::{DailyBar, DailyBarQuery, InstrumentRecord, QuoteRecord, SourcePriorityEntry},
        search::SearchPattern,
        service::{UnifiedStockService, UnifiedStockServiceTrait},
        store::{SourcePriorityStore, StockDocumentStore},
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use unistock_market_data::{
        DirectoryEntry, HistoryBar, LiveMarketProvider, MarketDataError, SeriesRow, TickerInfo,
        TickerSummary,
    };

    // =========================================================================
    // Mock StockDocumentStore
    // =========================================================================

    #[derive(Clone, Default)]
    struct MockDocumentStore {
        instruments: Arc<Mutex<HashMap<String, Vec<InstrumentRecord>>>>,
        quotes: Arc<Mutex<HashMap<String, Vec<QuoteRecord>>>>,
        daily: Arc<Mutex<HashMap<String, Vec<DailyBar>>>>,
        calls: Arc<Mutex<Vec<String>>>,
        fail: Arc<Mutex<bool>>,
    }

    impl MockDocumentStore {
        fn add_instrument(&self, collection: &str, record: InstrumentRecord) {
            self.instruments
                .lock()
                .unwrap()
                .entry(collection.to_string())
                .or_default()
                .push(record);
        }

        fn add_quote(&self, collection: &str, quote: QuoteRecord) {
            self.quotes
                .lock()
                .unwrap()
                .entry(collection.to_string())
                .or_default()
                .push(quote);
        }

        fn add_bar(&self, collection: &str, bar: DailyBar) {
            self.daily
                .lock()
                .unwrap()
                .entry(collection.to_string())
                .or_default()
                .push(bar);
        }

        fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record_call(&self, call: String) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            if *self.fail.lock().unwrap() {
                return Err(DatabaseError::QueryFailed("store offline".to_string()).into());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl StockDocumentStore for MockDocumentStore {
        async fn find_instrument(
            &self,
            collection: &str,
            code: &str,
            source: Option<&str>,
        ) -> Result<Option<InstrumentRecord>> {
            self.record_call(format!("find_instrument:{}:{}:{:?}", collection, code, source))?;
            let instruments = self.instruments.lock().unwrap();
            Ok(instruments.get(collection).and_then(|records| {
                records
                    .iter()
                    .find(|r| r.code == code && (source.is_none() || r.source.as_deref() == source))
                    .cloned()
            }))
        }

        async fn search_instruments(
            &self,
            collection: &str,
            pattern: &SearchPattern,
        ) -> Result<Vec<InstrumentRecord>> {
            self.record_call(format!("search_instruments:{}:{}", collection, pattern.query()))?;
            let instruments = self.instruments.lock().unwrap();
            Ok(instruments
                .get(collection)
                .map(|records| records.iter().filter(|r| pattern.matches(r)).cloned().collect())
                .unwrap_or_default())
        }

        async fn find_quote(&self, collection: &str, code: &str) -> Result<Option<QuoteRecord>> {
            self.record_call(format!("find_quote:{}:{}", collection, code))?;
            let quotes = self.quotes.lock().unwrap();
            Ok(quotes
                .get(collection)
                .and_then(|q| q.iter().find(|q| q.code == code).cloned()))
        }

        async fn find_daily_bars(
            &self,
            collection: &str,
            query: &DailyBarQuery,
        ) -> Result<Vec<DailyBar>> {
            self.record_call(format!("find_daily_bars:{}:{}", collection, query.code))?;
            let start = query.start.map(|d| d.format("%Y-%m-%d").to_string());
            let end = query.end.map(|d| d.format("%Y-%m-%d").to_string());
            let daily = self.daily.lock().unwrap();
            let mut bars: Vec<DailyBar> = daily
                .get(collection)
                .map(|bars| {
                    bars.iter()
                        .filter(|b| b.code == query.code)
                        .filter(|b| start.as_ref().map_or(true, |s| &b.trade_date >= s))
                        .filter(|b| end.as_ref().map_or(true, |e| &b.trade_date <= e))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            bars.sort_by(|a, b| b.trade_date.cmp(&a.trade_date));
            bars.truncate(query.limit);
            Ok(bars)
        }
    }

    // =========================================================================
    // Mock SourcePriorityStore
    // =========================================================================

    #[derive(Clone, Default)]
    struct MockPriorityStore {
        entries: Arc<Mutex<Vec<SourcePriorityEntry>>>,
        fail: Arc<Mutex<bool>>,
    }

    impl MockPriorityStore {
        fn with_entries(entries: Vec<SourcePriorityEntry>) -> Self {
            Self {
                entries: Arc::new(Mutex::new(entries)),
                fail: Arc::new(Mutex::new(false)),
            }
        }
    }

    #[async_trait]
    impl SourcePriorityStore for MockPriorityStore {
        async fn enabled_entries(&self, market_category: &str) -> Result<Vec<SourcePriorityEntry>> {
            if *self.fail.lock().unwrap() {
                return Err(DatabaseError::ConnectionFailed("groupings offline".to_string()).into());
            }
            let mut entries: Vec<SourcePriorityEntry> = self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.market_category_id == market_category && e.enabled)
                .cloned()
                .collect();
            entries.sort_by(|a, b| b.priority.cmp(&a.priority));
            Ok(entries)
        }
    }

    // =========================================================================
    // Fake LiveMarketProvider
    // =========================================================================

    #[derive(Clone, Copy, Default, PartialEq)]
    enum LiveBehaviour {
        #[default]
        Serve,
        Missing,
        Fail,
    }

    #[derive(Clone, Default)]
    struct FakeLiveProvider {
        info: Arc<Mutex<Option<TickerInfo>>>,
        series: Arc<Mutex<Vec<SeriesRow>>>,
        behaviour: Arc<Mutex<LiveBehaviour>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeLiveProvider {
        fn set_behaviour(&self, behaviour: LiveBehaviour) {
            *self.behaviour.lock().unwrap() = behaviour;
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn outcome(&self) -> std::result::Result<(), MarketDataError> {
            match *self.behaviour.lock().unwrap() {
                LiveBehaviour::Fail => Err(MarketDataError::RateLimited {
                    provider: "YAHOO".to_string(),
                }),
                _ => Ok(()),
            }
        }
    }

    #[async_trait]
    impl LiveMarketProvider for FakeLiveProvider {
        fn id(&self) -> &'static str {
            "FAKE_MY"
        }

        async fn fetch_info(
            &self,
            code: &str,
        ) -> std::result::Result<Option<TickerInfo>, MarketDataError> {
            self.calls.lock().unwrap().push(format!("info:{}", code));
            self.outcome()?;
            if *self.behaviour.lock().unwrap() == LiveBehaviour::Missing {
                return Ok(None);
            }
            Ok(self.info.lock().unwrap().clone())
        }

        async fn fetch_series(
            &self,
            code: &str,
            _start: Option<NaiveDate>,
            _end: Option<NaiveDate>,
        ) -> std::result::Result<Vec<SeriesRow>, MarketDataError> {
            self.calls.lock().unwrap().push(format!("series:{}", code));
            self.outcome()?;
            if *self.behaviour.lock().unwrap() == LiveBehaviour::Missing {
                return Ok(Vec::new());
            }
            Ok(self.series.lock().unwrap().clone())
        }

        fn search_directory(&self, query: &str, limit: usize) -> Vec<DirectoryEntry> {
            self.calls.lock().unwrap().push(format!("search:{}", query));
            vec![
                DirectoryEntry::new("1155.KL", "Maybank"),
                DirectoryEntry::new("1295.KL", "Public Bank"),
            ]
            .into_iter()
            .take(limit)
            .collect()
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    struct Harness {
        service: UnifiedStockService,
        documents: MockDocumentStore,
        priorities: MockPriorityStore,
        live: FakeLiveProvider,
    }

    fn harness() -> Harness {
        let documents = MockDocumentStore::default();
        let priorities = MockPriorityStore::default();
        let live = FakeLiveProvider::default();
        let service = UnifiedStockService::new(
            Arc::new(documents.clone()),
            Arc::new(priorities.clone()),
            Arc::new(live.clone()),
        );
        Harness {
            service,
            documents,
            priorities,
            live,
        }
    }

    fn instrument(code: &str, source: Option<&str>, name: &str) -> InstrumentRecord {
        InstrumentRecord {
            code: code.to_string(),
            name: Some(name.to_string()),
            source: source.map(str::to_string),
            ..Default::default()
        }
    }

    fn bar(code: &str, date: &str, close: rust_decimal::Decimal) -> DailyBar {
        DailyBar {
            code: code.to_string(),
            trade_date: date.to_string(),
            close: Some(close),
            ..Default::default()
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn maybank_info() -> TickerInfo {
        TickerInfo::from_summary(
            "1155.KL",
            "Maybank (马来亚银行)",
            "yahoo_finance",
            TickerSummary {
                current_price: Some(dec!(9.85)),
                previous_close: Some(dec!(9.80)),
                day_high: Some(dec!(9.90)),
                day_low: Some(dec!(9.78)),
                volume: Some(dec!(12000000)),
                ..Default::default()
            },
        )
    }

    // =========================================================================
    // get_stock_info
    // =========================================================================

    #[tokio::test]
    async fn test_explicit_source_does_not_fall_back() {
        let h = harness();
        h.documents
            .add_instrument("stock_basic_info", instrument("600000", Some("akshare"), "浦发银行"));

        let missing = h
            .service
            .get_stock_info(Market::Cn, "600000", Some("tushare"))
            .await
            .unwrap();
        assert!(missing.is_none());
        assert_eq!(h.documents.calls().len(), 1);

        let found = h
            .service
            .get_stock_info(Market::Cn, "600000", Some("akshare"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().source.as_deref(), Some("akshare"));
    }

    #[tokio::test]
    async fn test_blank_source_resolves_through_priority() {
        let h = harness();
        h.documents
            .add_instrument("stock_basic_info", instrument("600000", Some("tushare"), "ts"));

        for blank in ["", "  "] {
            let record = h
                .service
                .get_stock_info(Market::Cn, "600000", Some(blank))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(record.source.as_deref(), Some("tushare"));
        }
    }

    #[tokio::test]
    async fn test_info_follows_default_priority() {
        let h = harness();
        h.documents
            .add_instrument("stock_basic_info", instrument("600000", Some("akshare"), "ak"));
        h.documents
            .add_instrument("stock_basic_info", instrument("600000", Some("tushare"), "ts"));

        let record = h
            .service
            .get_stock_info(Market::Cn, "600000", None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.source.as_deref(), Some("tushare"));
        assert_eq!(
            h.documents.calls(),
            vec!["find_instrument:stock_basic_info:600000:Some(\"tushare\")".to_string()]
        );
    }

    #[tokio::test]
    async fn test_info_follows_configured_priority() {
        let h = harness();
        *h.priorities.entries.lock().unwrap() = vec![
            SourcePriorityEntry::new("hk_stocks", "akshare_hk", 10, true),
            SourcePriorityEntry::new("hk_stocks", "yfinance_hk", 1, true),
        ];
        h.documents
            .add_instrument("stock_basic_info_hk", instrument("00700", Some("yfinance_hk"), "yf"));
        h.documents
            .add_instrument("stock_basic_info_hk", instrument("00700", Some("akshare_hk"), "ak"));

        let record = h
            .service
            .get_stock_info(Market::Hk, "00700", None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.source.as_deref(), Some("akshare_hk"));
    }

    #[tokio::test]
    async fn test_info_falls_back_to_record_without_source() {
        let h = harness();
        h.documents
            .add_instrument("stock_basic_info_us", instrument("AAPL", None, "Apple"));

        let record = h
            .service
            .get_stock_info(Market::Us, "AAPL", None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.name.as_deref(), Some("Apple"));
        assert_eq!(h.documents.calls().len(), 2);
        assert!(h.documents.calls()[1].ends_with(":None"));
    }

    #[tokio::test]
    async fn test_info_uses_defaults_when_groupings_fail() {
        let h = harness();
        *h.priorities.fail.lock().unwrap() = true;
        h.documents
            .add_instrument("stock_basic_info", instrument("000001", Some("baostock"), "平安银行"));

        let record = h
            .service
            .get_stock_info(Market::Cn, "000001", None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.source.as_deref(), Some("baostock"));
        assert_eq!(h.documents.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let h = harness();
        h.documents.set_fail(true);

        let result = h.service.get_stock_info(Market::Cn, "600000", None).await;
        assert!(result.is_err());
    }

    // =========================================================================
    // get_stock_quote
    // =========================================================================

    #[tokio::test]
    async fn test_quote_reads_market_collection() {
        let h = harness();
        h.documents.add_quote(
            "market_quotes_hk",
            QuoteRecord {
                code: "00700".to_string(),
                close: Some(dec!(290.2)),
                ..Default::default()
            },
        );

        let quote = h.service.get_stock_quote(Market::Hk, "00700").await.unwrap();
        assert_eq!(quote.unwrap().close, Some(dec!(290.2)));
        assert!(h
            .service
            .get_stock_quote(Market::Us, "00700")
            .await
            .unwrap()
            .is_none());
    }

    // =========================================================================
    // search_stocks
    // =========================================================================

    #[tokio::test]
    async fn test_search_deduplicates_by_priority() {
        let h = harness();
        h.documents
            .add_instrument("stock_basic_info", instrument("600000", Some("akshare"), "浦发银行"));
        h.documents
            .add_instrument("stock_basic_info", instrument("600036", Some("akshare"), "招商银行"));
        h.documents
            .add_instrument("stock_basic_info", instrument("600000", Some("tushare"), "浦发银行"));

        let results = h.service.search_stocks(Market::Cn, "银行", 20).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].code, "600000");
        assert_eq!(results[0].source.as_deref(), Some("tushare"));
        assert_eq!(results[1].code, "600036");
    }

    #[tokio::test]
    async fn test_search_unranked_duplicate_keeps_first() {
        let h = harness();
        h.documents
            .add_instrument("stock_basic_info_us", instrument("AAPL", Some("yfinance_us"), "first"));
        h.documents
            .add_instrument("stock_basic_info_us", instrument("AAPL", Some("finnhub"), "second"));

        let results = h.service.search_stocks(Market::Us, "aapl", 20).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_search_applies_limit_after_dedup() {
        let h = harness();
        for code in ["600000", "600036", "601398"] {
            h.documents
                .add_instrument("stock_basic_info", instrument(code, Some("akshare"), "bank"));
            h.documents
                .add_instrument("stock_basic_info", instrument(code, Some("tushare"), "bank"));
        }

        let results = h.service.search_stocks(Market::Cn, "^60", 2).await.unwrap();
        let codes: Vec<&str> = results.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["600000", "600036"]);
    }

    #[tokio::test]
    async fn test_search_without_matches_is_empty() {
        let h = harness();
        h.documents
            .add_instrument("stock_basic_info", instrument("600000", Some("tushare"), "浦发银行"));

        let results = h.service.search_stocks(Market::Cn, "nothing", 20).await.unwrap();
        assert!(results.is_empty());
    }

    // =========================================================================
    // get_daily_quotes
    // =========================================================================

    #[tokio::test]
    async fn test_daily_quotes_range_is_descending_and_limited() {
        let h = harness();
        for (d, close) in [
            ("2024-01-02", dec!(10.1)),
            ("2024-01-03", dec!(10.2)),
            ("2024-01-04", dec!(10.3)),
            ("2024-01-05", dec!(10.4)),
            ("2024-01-08", dec!(10.5)),
        ] {
            h.documents.add_bar("stock_daily_quotes", bar("600000", d, close));
        }
        h.documents
            .add_bar("stock_daily_quotes", bar("600036", "2024-01-04", dec!(33)));

        let bars = h
            .service
            .get_daily_quotes(
                Market::Cn,
                "600000",
                Some(date("2024-01-03")),
                Some(date("2024-01-05")),
                2,
            )
            .await
            .unwrap();

        let dates: Vec<&str> = bars.iter().map(|b| b.trade_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-05", "2024-01-04"]);
        assert!(bars.iter().all(|b| b.code == "600000"));
    }

    // =========================================================================
    // Malaysia
    // =========================================================================

    #[tokio::test]
    async fn test_my_info_uses_live_provider_only() {
        let h = harness();
        *h.live.info.lock().unwrap() = Some(maybank_info());

        let record = h
            .service
            .get_stock_info(Market::My, "1155", Some("tushare"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.code, "1155.KL");
        assert_eq!(record.market.as_deref(), Some("MY"));
        assert_eq!(record.source.as_deref(), Some("yfinance"));
        assert_eq!(record.currency.as_deref(), Some("MYR"));
        assert!(h.documents.calls().is_empty());
        assert_eq!(h.live.calls(), vec!["info:1155".to_string()]);
    }

    #[tokio::test]
    async fn test_my_quote_maps_live_info() {
        let h = harness();
        *h.live.info.lock().unwrap() = Some(maybank_info());

        let quote = h
            .service
            .get_stock_quote(Market::My, "1155")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(quote.close, Some(dec!(9.85)));
        assert_eq!(quote.pre_close, Some(dec!(9.80)));
        assert_eq!(quote.high, Some(dec!(9.90)));
        assert_eq!(quote.low, Some(dec!(9.78)));
        assert_eq!(quote.volume, Some(dec!(12000000)));
    }

    #[tokio::test]
    async fn test_my_provider_failure_yields_none() {
        let h = harness();
        *h.live.info.lock().unwrap() = Some(maybank_info());
        h.live.set_behaviour(LiveBehaviour::Fail);

        assert!(h
            .service
            .get_stock_info(Market::My, "1155", None)
            .await
            .unwrap()
            .is_none());
        assert!(h
            .service
            .get_daily_quotes(Market::My, "1155", None, None, 100)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_my_lookup_reports_reason() {
        let h = harness();
        *h.live.info.lock().unwrap() = Some(maybank_info());

        h.live.set_behaviour(LiveBehaviour::Missing);
        assert_eq!(
            h.service.my_stock_info("9999").await,
            LiveLookup::Unavailable(UnavailableReason::NotFound)
        );

        h.live.set_behaviour(LiveBehaviour::Fail);
        match h.service.my_stock_quote("1155").await {
            LiveLookup::Unavailable(UnavailableReason::Provider(message)) => {
                assert!(message.contains("Rate limited"));
            }
            other => panic!("unexpected lookup: {:?}", other),
        }

        h.live.set_behaviour(LiveBehaviour::Serve);
        assert!(h.service.my_stock_info("1155").await.is_found());
    }

    #[tokio::test]
    async fn test_my_daily_quotes_descending_and_limited() {
        let h = harness();
        let bars: Vec<HistoryBar> = ["2024-03-01", "2024-03-04", "2024-03-05"]
            .iter()
            .map(|d| HistoryBar {
                date: date(d),
                open: None,
                high: None,
                low: None,
                close: dec!(9.5),
                volume: Some(dec!(1000)),
            })
            .collect();
        *h.live.series.lock().unwrap() = SeriesRow::from_bars(bars);

        let daily = h
            .service
            .get_daily_quotes(Market::My, "1155", None, None, 2)
            .await
            .unwrap();

        let dates: Vec<&str> = daily.iter().map(|b| b.trade_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-03-04"]);
        assert_eq!(daily[0].code, "1155");
        assert!(h.documents.calls().is_empty());
    }

    #[tokio::test]
    async fn test_my_search_uses_directory() {
        let h = harness();

        let results = h.service.search_stocks(Market::My, "bank", 1).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "1155.KL");
        assert_eq!(results[0].market.as_deref(), Some("MY"));
        assert!(h.documents.calls().is_empty());
    }

    // =========================================================================
    // Markets and priorities
    // =========================================================================

    #[tokio::test]
    async fn test_supported_markets() {
        let h = harness();
        let markets = h.service.get_supported_markets();

        let codes: Vec<&str> = markets.iter().map(|m| m.code).collect();
        assert_eq!(codes, vec!["CN", "HK", "US", "MY"]);
        assert_eq!(markets[3].currency, "MYR");
    }

    #[tokio::test]
    async fn test_resolve_priority_prefers_configuration() {
        let store = MockPriorityStore::with_entries(vec![
            SourcePriorityEntry::new("a_shares", "akshare", 5, true),
            SourcePriorityEntry::new("a_shares", "tushare", 3, true),
            SourcePriorityEntry::new("a_shares", "baostock", 9, false),
        ]);
        let service = UnifiedStockService::new(
            Arc::new(MockDocumentStore::default()),
            Arc::new(store),
            Arc::new(FakeLiveProvider::default()),
        );

        assert_eq!(service.resolve_priority(Market::Cn).await, vec!["akshare", "tushare"]);
        assert_eq!(service.resolve_priority(Market::Us).await, vec!["yfinance_us"]);
    }
}
