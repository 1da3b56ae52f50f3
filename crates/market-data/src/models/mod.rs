//! Market data models
//!
//! - `ticker` - Upstream ticker snapshot and the provider-level info record
//! - `series` - Daily history bars and their day-over-day enrichment
//! - `search` - Directory entries used for offline symbol search

mod search;
mod series;
mod ticker;

pub use search::DirectoryEntry;
pub use series::{HistoryBar, SeriesRow};
pub use ticker::{TickerInfo, TickerSummary};
