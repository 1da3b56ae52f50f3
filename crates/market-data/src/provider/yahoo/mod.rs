//! Yahoo Finance upstream.
//!
//! Summary snapshots come from the quoteSummary endpoint, which needs a
//! cookie/crumb pair. Daily history comes from the chart API through
//! `yahoo_finance_api`.

mod models;

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use reqwest::header;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{HistoryBar, TickerSummary};
use crate::provider::TickerSource;

use models::{YahooQuoteSummaryResponse, YahooQuoteSummaryResult, YahooValue};

const PROVIDER_ID: &str = "YAHOO";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const SUMMARY_MODULES: &str = "price,summaryDetail,defaultKeyStatistics,financialData";

/// Bursa trading days are dated in Malaysia time (UTC+8).
const EXCHANGE_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

/// Yahoo Finance client.
///
/// The crumb is cached on the instance and dropped when Yahoo answers 401.
pub struct YahooClient {
    connector: yahoo::YahooConnector,
    http: reqwest::Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooClient {
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::yahoo(format!("Failed to initialize Yahoo connector: {}", e))
        })?;
        Ok(Self {
            connector,
            http: reqwest::Client::new(),
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        {
            let guard = self.crumb.read().unwrap_or_else(|p| p.into_inner());
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }

        self.fetch_crumb().await
    }

    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        let response = self
            .http
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| MarketDataError::yahoo(format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::yahoo("Failed to parse Yahoo cookie"))?;

        let crumb = self
            .http
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::yahoo(format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| MarketDataError::yahoo(format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };

        let mut guard = self.crumb.write().unwrap_or_else(|p| p.into_inner());
        *guard = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    fn clear_crumb(&self) {
        let mut guard = self.crumb.write().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    // ========================================================================
    // Summary
    // ========================================================================

    async fn fetch_summary_result(
        &self,
        symbol: &str,
    ) -> Result<YahooQuoteSummaryResult, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules={}&crumb={}",
            encode(symbol),
            SUMMARY_MODULES,
            encode(&crumb.crumb)
        );

        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::yahoo(format!("Summary request failed: {}", e)))?;

        match response.status() {
            reqwest::StatusCode::UNAUTHORIZED => {
                self.clear_crumb();
                return Err(MarketDataError::yahoo("Yahoo authentication expired"));
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            reqwest::StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            _ => {}
        }

        let data: YahooQuoteSummaryResponse = response.json().await.map_err(|e| {
            MarketDataError::yahoo(format!("Failed to parse summary response: {}", e))
        })?;

        if let Some(error) = data.quote_summary.error {
            debug!(
                "quoteSummary error for {}: {:?} {:?}",
                symbol, error.code, error.description
            );
        }

        data.quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn to_decimal(value: Option<YahooValue>) -> Option<Decimal> {
    value.and_then(|v| v.raw).and_then(Decimal::from_f64)
}

/// Flatten the quoteSummary modules into a single snapshot.
///
/// Values from the `price` module win over `summaryDetail` where both exist.
fn summary_from_result(result: YahooQuoteSummaryResult) -> TickerSummary {
    let price = result.price.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let stats = result.default_key_statistics.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();

    TickerSummary {
        short_name: price.short_name,
        long_name: price.long_name,
        currency: price.currency.or(detail.currency),
        exchange: price.exchange,
        current_price: to_decimal(financial.current_price)
            .or_else(|| to_decimal(price.regular_market_price)),
        previous_close: to_decimal(price.regular_market_previous_close)
            .or_else(|| to_decimal(detail.previous_close)),
        open: to_decimal(price.regular_market_open).or_else(|| to_decimal(detail.open)),
        day_high: to_decimal(price.regular_market_day_high)
            .or_else(|| to_decimal(detail.day_high)),
        day_low: to_decimal(price.regular_market_day_low).or_else(|| to_decimal(detail.day_low)),
        volume: to_decimal(price.regular_market_volume).or_else(|| to_decimal(detail.volume)),
        market_cap: to_decimal(price.market_cap).or_else(|| to_decimal(detail.market_cap)),
        trailing_pe: to_decimal(detail.trailing_pe),
        price_to_book: to_decimal(stats.price_to_book),
        dividend_yield: to_decimal(detail.dividend_yield),
        fifty_two_week_high: to_decimal(detail.fifty_two_week_high),
        fifty_two_week_low: to_decimal(detail.fifty_two_week_low),
    }
}

/// Midnight UTC of `date` as a `time::OffsetDateTime` for the chart API.
fn date_to_offset_datetime(date: NaiveDate) -> OffsetDateTime {
    let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(timestamp).unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Raw chart bar fields.
#[derive(Debug, Clone, Copy)]
struct ChartBar {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl From<&yahoo::Quote> for ChartBar {
    fn from(q: &yahoo::Quote) -> Self {
        Self {
            timestamp: q.timestamp as i64,
            open: q.open,
            high: q.high,
            low: q.low,
            close: q.close,
            volume: q.volume,
        }
    }
}

/// Convert a chart bar to a [`HistoryBar`] dated in exchange-local time.
fn chart_bar_to_history(bar: ChartBar) -> Result<HistoryBar, MarketDataError> {
    let timestamp = Utc.timestamp_opt(bar.timestamp, 0).single().ok_or_else(|| {
        MarketDataError::ValidationFailed {
            message: format!("Invalid timestamp: {}", bar.timestamp),
        }
    })?;

    let offset = FixedOffset::east_opt(EXCHANGE_UTC_OFFSET_SECS).ok_or_else(|| {
        MarketDataError::ValidationFailed {
            message: "Invalid exchange offset".to_string(),
        }
    })?;

    let close =
        Decimal::from_f64(bar.close).ok_or_else(|| MarketDataError::ValidationFailed {
            message: format!("Failed to convert close price {} to Decimal", bar.close),
        })?;

    Ok(HistoryBar {
        date: timestamp.with_timezone(&offset).date_naive(),
        open: Decimal::from_f64(bar.open),
        high: Decimal::from_f64(bar.high),
        low: Decimal::from_f64(bar.low),
        close,
        volume: Decimal::from_u64(bar.volume),
    })
}

// ============================================================================
// TickerSource Implementation
// ============================================================================

#[async_trait]
impl TickerSource for YahooClient {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn ticker_summary(&self, symbol: &str) -> Result<TickerSummary, MarketDataError> {
        debug!("Fetching summary for {} from Yahoo", symbol);
        let result = self.fetch_summary_result(symbol).await?;
        Ok(summary_from_result(result))
    }

    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoryBar>, MarketDataError> {
        debug!(
            "Fetching daily history for {} from {} to {} from Yahoo",
            symbol, start, end
        );

        // The chart API treats the end bound as exclusive.
        let start_time = date_to_offset_datetime(start);
        let end_time = date_to_offset_datetime(end + ChronoDuration::days(1));

        let response = self
            .connector
            .get_quote_history(symbol, start_time, end_time)
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::yahoo(e.to_string())
                }
            })?;

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let bars: Vec<HistoryBar> = yahoo_quotes
                    .iter()
                    .filter_map(|q| match chart_bar_to_history(ChartBar::from(q)) {
                        Ok(bar) => Some(bar),
                        Err(e) => {
                            warn!("Skipping bar due to conversion error: {:?}", e);
                            None
                        }
                    })
                    .filter(|bar| bar.date >= start && bar.date <= end)
                    .collect();

                if bars.is_empty() {
                    return Err(MarketDataError::NoDataForRange);
                }

                Ok(bars)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No daily history returned for '{}' between {} and {}",
                    symbol, start, end
                );
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(MarketDataError::yahoo(e.to_string())),
        }
    }
}
