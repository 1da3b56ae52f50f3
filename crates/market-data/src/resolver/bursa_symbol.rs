//! Bursa Malaysia symbol normalization.
//!
//! Yahoo lists Bursa counters as a four-digit stock code followed by the
//! `.KL` suffix (e.g., "5347.KL" for Tenaga Nasional). Users tend to type the
//! bare code, sometimes without leading zeros, so every provider entry point
//! funnels the raw input through [`normalize_bursa_symbol`] first.

/// Yahoo suffix for Bursa Malaysia listings.
pub const BURSA_SUFFIX: &str = ".KL";

/// Normalize a user-supplied Bursa code to its Yahoo form.
///
/// - Input is trimmed and upper-cased; empty input stays empty.
/// - Symbols already carrying `.KL` are returned as-is.
/// - All-digit codes of length 4 get the suffix appended.
/// - Shorter all-digit codes are zero-padded to 4 digits first.
/// - Anything else (longer codes, warrants, foreign tickers) passes through.
pub fn normalize_bursa_symbol(symbol: &str) -> String {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() || symbol.ends_with(BURSA_SUFFIX) {
        return symbol;
    }

    if symbol.chars().all(|c| c.is_ascii_digit()) {
        if symbol.len() == 4 {
            return format!("{}{}", symbol, BURSA_SUFFIX);
        }
        if symbol.len() < 4 {
            return format!("{:0>4}{}", symbol, BURSA_SUFFIX);
        }
    }

    symbol
}

/// Strip the `.KL` suffix, leaving the bare stock code.
pub fn strip_bursa_suffix(symbol: &str) -> &str {
    symbol.strip_suffix(BURSA_SUFFIX).unwrap_or(symbol)
}
