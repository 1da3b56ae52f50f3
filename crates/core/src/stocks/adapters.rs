//! Translation from live provider output to stock records.

use std::fmt;

use unistock_market_data::{DirectoryEntry, SeriesRow, TickerInfo};

use super::model::{DailyBar, InstrumentRecord, QuoteRecord};
use crate::constants::{LIVE_SOURCE_YFINANCE, TRADE_DATE_FORMAT};
use crate::markets::Market;

const DEFAULT_LIVE_CURRENCY: &str = "MYR";
const DEFAULT_LIVE_EXCHANGE: &str = "KLS";

/// Why a live lookup produced nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The provider answered but does not know the instrument.
    NotFound,
    /// The provider failed.
    Provider(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NotFound => f.write_str("not found"),
            UnavailableReason::Provider(message) => write!(f, "provider error: {}", message),
        }
    }
}

/// Outcome of a live provider lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum LiveLookup<T> {
    Found(T),
    Unavailable(UnavailableReason),
}

impl<T> LiveLookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            LiveLookup::Found(value) => Some(value),
            LiveLookup::Unavailable(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LiveLookup::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LiveLookup<U> {
        match self {
            LiveLookup::Found(value) => LiveLookup::Found(f(value)),
            LiveLookup::Unavailable(reason) => LiveLookup::Unavailable(reason),
        }
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

pub fn info_to_instrument(info: &TickerInfo) -> InstrumentRecord {
    InstrumentRecord {
        code: info.symbol.clone(),
        name: Some(info.name.clone()),
        name_en: Some(info.name.clone()),
        market: Some(Market::My.code().to_string()),
        source: Some(LIVE_SOURCE_YFINANCE.to_string()),
        currency: Some(non_empty_or(&info.currency, DEFAULT_LIVE_CURRENCY)),
        exchange: Some(non_empty_or(&info.exchange, DEFAULT_LIVE_EXCHANGE)),
        total_mv: info.market_cap,
        pe: info.pe_ratio,
        pb: info.pb_ratio,
        current_price: info.current_price,
        previous_close: info.previous_close,
        fifty_two_week_high: info.fifty_two_week_high,
        fifty_two_week_low: info.fifty_two_week_low,
        ..Default::default()
    }
}

pub fn info_to_quote(info: &TickerInfo) -> QuoteRecord {
    QuoteRecord {
        code: info.symbol.clone(),
        name: Some(info.name.clone()),
        market: Some(Market::My.code().to_string()),
        source: Some(LIVE_SOURCE_YFINANCE.to_string()),
        currency: Some(non_empty_or(&info.currency, DEFAULT_LIVE_CURRENCY)),
        close: info.current_price,
        pre_close: info.previous_close,
        open: info.open,
        high: info.day_high,
        low: info.day_low,
        volume: info.volume,
        ..Default::default()
    }
}

/// Map series rows to daily bars for `code`, newest first, at most `limit`.
pub fn series_to_daily_bars(code: &str, rows: Vec<SeriesRow>, limit: usize) -> Vec<DailyBar> {
    let mut bars: Vec<DailyBar> = rows
        .into_iter()
        .map(|row| DailyBar {
            code: code.to_string(),
            trade_date: row.date.format(TRADE_DATE_FORMAT).to_string(),
            open: row.open,
            high: row.high,
            low: row.low,
            close: Some(row.close),
            volume: row.volume,
            market: Some(Market::My.code().to_string()),
            source: Some(LIVE_SOURCE_YFINANCE.to_string()),
            ..Default::default()
        })
        .collect();

    bars.sort_by(|a, b| b.trade_date.cmp(&a.trade_date));
    bars.truncate(limit);
    bars
}

pub fn directory_to_instrument(entry: &DirectoryEntry) -> InstrumentRecord {
    InstrumentRecord {
        code: entry.symbol.clone(),
        name: Some(entry.name.clone()),
        name_en: Some(entry.name.clone()),
        market: Some(Market::My.code().to_string()),
        source: Some(LIVE_SOURCE_YFINANCE.to_string()),
        ..Default::default()
    }
}
