//! Bursa Malaysia live provider.
//!
//! Wraps a [`TickerSource`] with symbol normalization, a name directory,
//! a JSON file cache for company names and a cooldown between upstream calls.

mod config;
mod directory;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use log::{debug, info, warn};
use serde_json::Value;

use crate::cache::FileCache;
use crate::errors::MarketDataError;
use crate::models::{DirectoryEntry, SeriesRow, TickerInfo};
use crate::provider::{LiveMarketProvider, TickerSource};
use crate::registry::Cooldown;
use crate::resolver::{normalize_bursa_symbol, strip_bursa_suffix};

pub use config::{
    BursaProviderConfig, DEFAULT_CACHE_FILE, DEFAULT_CACHE_TTL_SECS, DEFAULT_RATE_LIMIT_WAIT_SECS,
};
pub use directory::{lookup_name, search_directory, BURSA_DIRECTORY};

const PROVIDER_ID: &str = "BURSA";

/// Source tags written into cache entries and info records.
pub const SOURCE_BUILTIN: &str = "builtin_mapping";
pub const SOURCE_YAHOO: &str = "yahoo_finance";
pub const SOURCE_DEFAULT: &str = "default";

/// Default names expire this long after they are written.
const DEFAULT_NAME_LIFETIME_SECS: f64 = 1800.0;

const DEFAULT_HISTORY_DAYS: i64 = 365;

/// Live provider for Bursa Malaysia counters.
pub struct BursaProvider<S: TickerSource> {
    source: S,
    cache: FileCache,
    cooldown: Cooldown,
}

impl<S: TickerSource> BursaProvider<S> {
    pub fn new(source: S, config: BursaProviderConfig) -> Self {
        Self {
            source,
            cache: FileCache::open(config.cache_file, config.cache_ttl),
            cooldown: Cooldown::new(config.rate_limit_wait),
        }
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Display name for `code`.
    ///
    /// Lookup order: cache, built-in directory, upstream short name, then a
    /// generated "Malaysia Stock <digits>" name that is cached for only
    /// half an hour.
    pub async fn company_name(&self, code: &str) -> String {
        let symbol = normalize_bursa_symbol(code);
        let cache_key = format!("name_{}", symbol);

        if let Some(name) = self
            .cache
            .get_valid(&cache_key)
            .and_then(|entry| entry.data.as_str().map(str::to_string))
        {
            debug!("Company name for {} served from cache", symbol);
            return name;
        }

        if let Some(name) = lookup_name(&symbol) {
            self.cache
                .insert(&cache_key, Value::String(name.to_string()), SOURCE_BUILTIN);
            debug!("Company name for {} from directory: {}", symbol, name);
            return name.to_string();
        }

        self.cooldown.wait().await;
        match self.source.ticker_summary(&symbol).await {
            Ok(summary) => {
                if let Some(name) = summary.short_name.filter(|n| !n.trim().is_empty()) {
                    self.cache
                        .insert(&cache_key, Value::String(name.clone()), SOURCE_YAHOO);
                    debug!("Company name for {} from upstream: {}", symbol, name);
                    return name;
                }
            }
            Err(e) => debug!("Upstream name lookup failed for {}: {}", symbol, e),
        }

        let name = format!("Malaysia Stock {}", strip_bursa_suffix(&symbol));
        let timestamp = FileCache::now_timestamp() - self.cache.ttl().as_secs_f64()
            + DEFAULT_NAME_LIFETIME_SECS;
        self.cache.insert_with_timestamp(
            &cache_key,
            Value::String(name.clone()),
            SOURCE_DEFAULT,
            timestamp,
        );
        debug!("Using default company name for {}: {}", symbol, name);
        name
    }
}

#[async_trait]
impl<S: TickerSource> LiveMarketProvider for BursaProvider<S> {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_info(&self, code: &str) -> Result<Option<TickerInfo>, MarketDataError> {
        let symbol = normalize_bursa_symbol(code);
        if symbol.is_empty() {
            return Ok(None);
        }

        let name = self.company_name(&symbol).await;

        self.cooldown.wait().await;
        match self.source.ticker_summary(&symbol).await {
            Ok(summary) => Ok(Some(TickerInfo::from_summary(
                symbol,
                name,
                SOURCE_YAHOO,
                summary,
            ))),
            Err(e) if e.is_not_found() => {
                debug!("No upstream info for {}: {}", symbol, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_series(
        &self,
        code: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<SeriesRow>, MarketDataError> {
        let symbol = normalize_bursa_symbol(code);
        if symbol.is_empty() {
            return Ok(Vec::new());
        }

        // The default window is anchored on today, not on `end`.
        let today = Utc::now().date_naive();
        let end = end.unwrap_or(today);
        let start = start.unwrap_or(today - ChronoDuration::days(DEFAULT_HISTORY_DAYS));
        if start > end {
            warn!("Empty range for {}: {} is after {}", symbol, start, end);
            return Ok(Vec::new());
        }

        info!("Fetching daily series for {} ({} ~ {})", symbol, start, end);

        self.cooldown.wait().await;
        let bars = match self.source.daily_history(&symbol, start, end).await {
            Ok(bars) => bars,
            Err(e) if e.is_not_found() => {
                warn!("No daily series for {}: {}", symbol, e);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let rows = SeriesRow::from_bars(bars);
        info!("Fetched {} daily rows for {}", rows.len(), symbol);
        Ok(rows)
    }

    fn search_directory(&self, query: &str, limit: usize) -> Vec<DirectoryEntry> {
        search_directory(query, limit)
    }
}
