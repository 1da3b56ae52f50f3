/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Default number of daily bars
pub const DEFAULT_DAILY_LIMIT: usize = 100;

/// Source tag on records produced from the live Malaysia provider
pub const LIVE_SOURCE_YFINANCE: &str = "yfinance";

/// Date format for `trade_date` values
pub const TRADE_DATE_FORMAT: &str = "%Y-%m-%d";
