//! Domain models for stock records.
//!
//! Records mirror the documents kept in the store. Well-known fields are
//! typed; anything else a source wrote is kept in `extra` so callers see the
//! whole document.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Basic information for one instrument from one source.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct InstrumentRecord {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    /// Total market value
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub total_mv: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub pe: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub pb: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub current_price: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub previous_close: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub fifty_two_week_high: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub fifty_two_week_low: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Latest quote snapshot for one instrument.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct QuoteRecord {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_date: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub open: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub high: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub low: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub close: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub pre_close: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub volume: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub pct_chg: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One trading day of OHLCV data.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyBar {
    #[serde(default)]
    pub code: String,
    /// Trading day as `YYYY-MM-DD`
    #[serde(default)]
    pub trade_date: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub open: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub high: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub low: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub close: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_decimal::deserialize_option_decimal"
    )]
    pub volume: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A configured data source for a market category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourcePriorityEntry {
    pub market_category_id: String,
    pub data_source_name: String,
    /// Higher ranks are tried first
    pub priority: i32,
    pub enabled: bool,
}

impl SourcePriorityEntry {
    pub fn new(
        market_category_id: impl Into<String>,
        data_source_name: impl Into<String>,
        priority: i32,
        enabled: bool,
    ) -> Self {
        Self {
            market_category_id: market_category_id.into(),
            data_source_name: data_source_name.into(),
            priority,
            enabled,
        }
    }
}

/// Range query for daily bars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyBarQuery {
    pub code: String,
    /// Inclusive lower bound
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end: Option<NaiveDate>,
    pub limit: usize,
}

// Stored documents carry numbers as JSON numbers, numeric strings, null, or
// non-finite markers such as "NaN". Anything that is not a finite decimal reads as None.
mod lenient_decimal {
    use log::debug;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;

    fn parse_decimal_value(value: &str) -> Option<Decimal> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
    }

    pub fn deserialize_option_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        let parsed = match &raw {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(s)) => parse_decimal_value(s),
            Some(Value::Number(n)) => parse_decimal_value(&n.to_string()),
            Some(_) => None,
        };
        if parsed.is_none() {
            debug!("Ignoring non-decimal value {:?}", raw);
        }
        Ok(parsed)
    }
}
