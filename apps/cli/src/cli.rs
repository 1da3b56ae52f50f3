use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use unistock_core::constants::{DEFAULT_DAILY_LIMIT, DEFAULT_SEARCH_LIMIT};
use unistock_core::Market;

#[derive(Debug, Parser)]
#[command(name = "unistock", version, about = "Cross-market stock queries")]
pub struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Basic information for one instrument
    Info {
        market: Market,
        code: String,
        /// Only consider records from this source
        #[arg(long)]
        source: Option<String>,
    },
    /// Latest quote for one instrument
    Quote { market: Market, code: String },
    /// Search instruments by code or name
    Search {
        market: Market,
        query: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Daily bars, newest first
    Daily {
        market: Market,
        code: String,
        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, default_value_t = DEFAULT_DAILY_LIMIT)]
        limit: usize,
    },
    /// Supported markets
    Markets,
    /// Resolved source priority for a market
    Priority { market: String },
}
