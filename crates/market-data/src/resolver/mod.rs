//! Symbol resolution for live market data providers.
//!
//! Providers receive whatever the caller typed; this module turns it into
//! the provider-specific symbol form before any cache key or HTTP request is
//! built from it.

mod bursa_symbol;

pub use bursa_symbol::{normalize_bursa_symbol, strip_bursa_suffix, BURSA_SUFFIX};
