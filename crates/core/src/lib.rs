//! Unistock Core - Markets, stock records, source priorities and the unified
//! query service.
//!
//! This crate is storage-agnostic. It defines the store traits that the
//! `storage-sqlite` crate implements and talks to live providers through the
//! `market-data` crate.

pub mod constants;
pub mod errors;
pub mod markets;
pub mod stocks;

pub use markets::{Market, MarketDescriptor};
pub use stocks::{UnifiedStockService, UnifiedStockServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
