use std::path::PathBuf;
use std::time::Duration;

use crate::settings::LayeredSettings;

pub const DEFAULT_CACHE_FILE: &str = "data/cache/my/my_stock_cache.json";
pub const DEFAULT_CACHE_TTL_SECS: i64 = 3600;
pub const DEFAULT_RATE_LIMIT_WAIT_SECS: i64 = 2;

const CACHE_TTL_ENV: &str = "TA_MY_CACHE_TTL_SECONDS";
const CACHE_TTL_KEY: &str = "ta_my_cache_ttl_seconds";
const RATE_LIMIT_WAIT_ENV: &str = "TA_MY_RATE_LIMIT_WAIT_SECONDS";
const RATE_LIMIT_WAIT_KEY: &str = "ta_my_rate_limit_wait_seconds";

/// Settings for [`BursaProvider`](super::BursaProvider).
#[derive(Clone, Debug, PartialEq)]
pub struct BursaProviderConfig {
    /// JSON cache location
    pub cache_file: PathBuf,
    /// How long cached names stay valid
    pub cache_ttl: Duration,
    /// Minimum spacing between upstream requests
    pub rate_limit_wait: Duration,
}

impl Default for BursaProviderConfig {
    fn default() -> Self {
        Self {
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS as u64),
            rate_limit_wait: Duration::from_secs(DEFAULT_RATE_LIMIT_WAIT_SECS as u64),
        }
    }
}

impl BursaProviderConfig {
    /// Resolve TTL and spacing from runtime settings. Negative values clamp to zero.
    pub fn from_settings(settings: &LayeredSettings) -> Self {
        let ttl = settings.get_int(CACHE_TTL_ENV, CACHE_TTL_KEY, DEFAULT_CACHE_TTL_SECS);
        let wait = settings.get_int(
            RATE_LIMIT_WAIT_ENV,
            RATE_LIMIT_WAIT_KEY,
            DEFAULT_RATE_LIMIT_WAIT_SECS,
        );

        Self {
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            cache_ttl: Duration::from_secs(ttl.max(0) as u64),
            rate_limit_wait: Duration::from_secs(wait.max(0) as u64),
        }
    }

    pub fn with_cache_file(mut self, cache_file: impl Into<PathBuf>) -> Self {
        self.cache_file = cache_file.into();
        self
    }
}
