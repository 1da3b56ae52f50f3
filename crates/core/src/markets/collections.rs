use super::Market;

/// Kind of record kept in the document store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    BasicInfo,
    Quotes,
    Daily,
    Financial,
    News,
}

/// Collection holding `kind` records for `market`.
pub fn collection_name(market: Market, kind: RecordKind) -> &'static str {
    use RecordKind::*;

    match (market, kind) {
        (Market::Cn, BasicInfo) => "stock_basic_info",
        (Market::Cn, Quotes) => "market_quotes",
        (Market::Cn, Daily) => "stock_daily_quotes",
        (Market::Cn, Financial) => "stock_financial_data",
        (Market::Cn, News) => "stock_news",

        (Market::Hk, BasicInfo) => "stock_basic_info_hk",
        (Market::Hk, Quotes) => "market_quotes_hk",
        (Market::Hk, Daily) => "stock_daily_quotes_hk",
        (Market::Hk, Financial) => "stock_financial_data_hk",
        (Market::Hk, News) => "stock_news_hk",

        (Market::Us, BasicInfo) => "stock_basic_info_us",
        (Market::Us, Quotes) => "market_quotes_us",
        (Market::Us, Daily) => "stock_daily_quotes_us",
        (Market::Us, Financial) => "stock_financial_data_us",
        (Market::Us, News) => "stock_news_us",

        (Market::My, BasicInfo) => "stock_basic_info_my",
        (Market::My, Quotes) => "market_quotes_my",
        (Market::My, Daily) => "stock_daily_quotes_my",
        (Market::My, Financial) => "stock_financial_data_my",
        (Market::My, News) => "stock_news_my",
    }
}
