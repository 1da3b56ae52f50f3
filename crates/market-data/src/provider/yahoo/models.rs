//! Yahoo Finance quoteSummary response models.
//!
//! Numeric fields arrive as `{"raw": 123.45, "fmt": "123.45"}` objects, or
//! as empty objects `{}` when Yahoo has no value.

use serde::Deserialize;

/// Main response wrapper for the quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<YahooQuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
pub struct YahooApiError {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// One result entry; only the requested modules are present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
    pub summary_detail: Option<YahooSummaryDetail>,
    pub default_key_statistics: Option<YahooKeyStatistics>,
    pub financial_data: Option<YahooFinancialData>,
}

/// Value with raw and formatted forms; only `raw` is used.
#[derive(Debug, Default, Deserialize, Clone, Copy)]
pub struct YahooValue {
    pub raw: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub currency: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub exchange: Option<String>,
    pub regular_market_price: Option<YahooValue>,
    pub regular_market_previous_close: Option<YahooValue>,
    pub regular_market_open: Option<YahooValue>,
    pub regular_market_day_high: Option<YahooValue>,
    pub regular_market_day_low: Option<YahooValue>,
    pub regular_market_volume: Option<YahooValue>,
    pub market_cap: Option<YahooValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryDetail {
    pub currency: Option<String>,
    pub previous_close: Option<YahooValue>,
    pub open: Option<YahooValue>,
    pub day_high: Option<YahooValue>,
    pub day_low: Option<YahooValue>,
    pub volume: Option<YahooValue>,
    pub market_cap: Option<YahooValue>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<YahooValue>,
    pub dividend_yield: Option<YahooValue>,
    pub fifty_two_week_high: Option<YahooValue>,
    pub fifty_two_week_low: Option<YahooValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooKeyStatistics {
    pub price_to_book: Option<YahooValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooFinancialData {
    pub current_price: Option<YahooValue>,
}
