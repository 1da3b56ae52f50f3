//! Stock query module.
//!
//! - [`model`] - Instrument, quote and daily bar records
//! - [`store`] - Storage traits for documents and source priorities
//! - [`priority`] - Source-priority resolution with built-in defaults
//! - [`search`] - Search patterns and per-code deduplication
//! - [`adapters`] - Live provider output to records
//! - [`service`] - Unified query facade over every market
//!
//! ```text
//! UnifiedStockService ──► StockDocumentStore      (CN, HK, US)
//!        │            └─► LiveMarketProvider      (MY)
//!        ▼
//! SourcePriorityResolver ──► SourcePriorityStore
//! ```

pub mod adapters;
pub mod model;
pub mod priority;
pub mod search;
pub mod service;
pub mod store;

#[cfg(test)]
mod service_tests;

pub use adapters::{LiveLookup, UnavailableReason};
pub use model::{DailyBar, DailyBarQuery, InstrumentRecord, QuoteRecord, SourcePriorityEntry};
pub use priority::SourcePriorityResolver;
pub use search::{dedup_by_source_priority, SearchPattern, SourceRanking};
pub use service::{UnifiedStockService, UnifiedStockServiceTrait};
pub use store::{SourcePriorityStore, StockDocumentStore};
