//! Supported markets and their fixed lookup tables.

mod collections;
mod market;

pub use collections::{collection_name, RecordKind};
pub use market::{Market, MarketDescriptor};
