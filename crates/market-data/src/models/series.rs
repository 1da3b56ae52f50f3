use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily bar as returned by an upstream [`TickerSource`].
///
/// [`TickerSource`]: crate::provider::TickerSource
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryBar {
    pub date: NaiveDate,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Decimal,
    pub volume: Option<Decimal>,
}

/// A daily bar enriched with day-over-day change fields.
///
/// `pre_close`, `change` and `pct_change` are derived from the previous row
/// of the same series, so the first row of a series never carries them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SeriesRow {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,
    pub close: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_close: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pct_change: Option<Decimal>,
}

impl SeriesRow {
    /// Sort bars by date ascending and derive the change columns.
    pub fn from_bars(mut bars: Vec<HistoryBar>) -> Vec<SeriesRow> {
        bars.sort_by_key(|b| b.date);

        let mut rows = Vec::with_capacity(bars.len());
        let mut previous_close: Option<Decimal> = None;

        for bar in bars {
            let change = previous_close.map(|prev| bar.close - prev);
            let pct_change = match (change, previous_close) {
                (Some(change), Some(prev)) => change
                    .checked_div(prev)
                    .map(|ratio| (ratio * Decimal::ONE_HUNDRED).round_dp(2)),
                _ => None,
            };

            rows.push(SeriesRow {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                pre_close: previous_close,
                change,
                pct_change,
            });

            previous_close = Some(bar.close);
        }

        rows
    }
}
