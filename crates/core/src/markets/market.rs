use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// A supported stock market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    /// China A-share
    Cn,
    /// Hong Kong
    Hk,
    /// United States
    Us,
    /// Malaysia (Bursa), served live
    My,
}

/// Static description of a market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MarketDescriptor {
    pub code: &'static str,
    pub name: &'static str,
    pub name_en: &'static str,
    pub currency: &'static str,
    pub timezone: &'static str,
}

impl Market {
    pub const ALL: [Market; 4] = [Market::Cn, Market::Hk, Market::Us, Market::My];

    pub fn code(&self) -> &'static str {
        match self {
            Market::Cn => "CN",
            Market::Hk => "HK",
            Market::Us => "US",
            Market::My => "MY",
        }
    }

    /// Category key used by the source-priority groupings.
    pub fn category(&self) -> &'static str {
        match self {
            Market::Cn => "a_shares",
            Market::Hk => "hk_stocks",
            Market::Us => "us_stocks",
            Market::My => "my_stocks",
        }
    }

    /// Source order used when no groupings are configured.
    pub fn default_sources(&self) -> &'static [&'static str] {
        match self {
            Market::Cn => &["tushare", "akshare", "baostock"],
            Market::Hk => &["yfinance_hk", "akshare_hk"],
            Market::Us => &["yfinance_us"],
            Market::My => &["yfinance_my"],
        }
    }

    /// True for markets answered by a live provider instead of the document store.
    pub fn is_live(&self) -> bool {
        matches!(self, Market::My)
    }

    pub fn descriptor(&self) -> MarketDescriptor {
        match self {
            Market::Cn => MarketDescriptor {
                code: "CN",
                name: "A股",
                name_en: "China A-Share",
                currency: "CNY",
                timezone: "Asia/Shanghai",
            },
            Market::Hk => MarketDescriptor {
                code: "HK",
                name: "港股",
                name_en: "Hong Kong Stock",
                currency: "HKD",
                timezone: "Asia/Hong_Kong",
            },
            Market::Us => MarketDescriptor {
                code: "US",
                name: "美股",
                name_en: "US Stock",
                currency: "USD",
                timezone: "America/New_York",
            },
            Market::My => MarketDescriptor {
                code: "MY",
                name: "马股",
                name_en: "Malaysia Stock",
                currency: "MYR",
                timezone: "Asia/Kuala_Lumpur",
            },
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Market {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CN" => Ok(Market::Cn),
            "HK" => Ok(Market::Hk),
            "US" => Ok(Market::Us),
            "MY" => Ok(Market::My),
            _ => Err(ValidationError::UnsupportedMarket(s.to_string()).into()),
        }
    }
}
