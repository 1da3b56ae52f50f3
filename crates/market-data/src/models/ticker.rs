use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw per-ticker snapshot returned by an upstream [`TickerSource`].
///
/// Every field is optional: Yahoo omits whatever it does not have for
/// thinly traded Bursa counters.
///
/// [`TickerSource`]: crate::provider::TickerSource
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TickerSummary {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub current_price: Option<Decimal>,
    pub previous_close: Option<Decimal>,
    pub open: Option<Decimal>,
    pub day_high: Option<Decimal>,
    pub day_low: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub trailing_pe: Option<Decimal>,
    pub price_to_book: Option<Decimal>,
    pub dividend_yield: Option<Decimal>,
    pub fifty_two_week_high: Option<Decimal>,
    pub fifty_two_week_low: Option<Decimal>,
}

/// Instrument information as exposed by a live provider.
///
/// This is the provider-side "info map": the symbol is already normalized
/// and the display name already resolved through the company-name lookup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TickerInfo {
    /// Normalized provider symbol (e.g., "5347.KL")
    pub symbol: String,

    /// Company display name
    pub name: String,

    /// Trading currency (e.g., "MYR")
    pub currency: String,

    /// Exchange code (e.g., "KLS")
    pub exchange: String,

    /// Human-readable market label
    pub market: String,

    /// Upstream the values came from
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_high: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_low: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pb_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_high: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_low: Option<Decimal>,
}

impl TickerInfo {
    /// Build an info record from an upstream summary.
    pub fn from_summary(
        symbol: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<String>,
        summary: TickerSummary,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            currency: "MYR".to_string(),
            exchange: "KLS".to_string(),
            market: "Bursa Malaysia".to_string(),
            source: source.into(),
            current_price: summary.current_price,
            previous_close: summary.previous_close,
            open: summary.open,
            day_high: summary.day_high,
            day_low: summary.day_low,
            volume: summary.volume,
            market_cap: summary.market_cap,
            pe_ratio: summary.trailing_pe,
            pb_ratio: summary.price_to_book,
            dividend_yield: summary.dividend_yield,
            fifty_two_week_high: summary.fifty_two_week_high,
            fifty_two_week_low: summary.fifty_two_week_low,
        }
    }
}
