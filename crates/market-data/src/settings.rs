//! Runtime settings lookup for providers.
//!
//! Provider knobs can come from the process environment or from a persisted
//! settings store. [`LayeredSettings`] checks the environment first, then the
//! store, then falls back to the supplied default.

use std::sync::Arc;

use log::warn;

/// Read-only access to string-valued settings.
pub trait SettingsReader: Send + Sync {
    /// Raw value for `key`, if one is set.
    fn get_value(&self, key: &str) -> Option<String>;

    /// Integer value for `key`, or `default` when unset or unparseable.
    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get_value(key) {
            Some(raw) => parse_int(key, &raw, default),
            None => default,
        }
    }
}

fn parse_int(key: &str, raw: &str, default: i64) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "Setting '{}' has non-integer value '{}', using default {}",
                key, raw, default
            );
            default
        }
    }
}

/// Settings backed by process environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSettingsReader;

impl SettingsReader for EnvSettingsReader {
    fn get_value(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

/// Environment first, then an optional settings store.
#[derive(Clone)]
pub struct LayeredSettings {
    env: Arc<dyn SettingsReader>,
    store: Option<Arc<dyn SettingsReader>>,
}

impl LayeredSettings {
    pub fn new(store: Option<Arc<dyn SettingsReader>>) -> Self {
        Self {
            env: Arc::new(EnvSettingsReader),
            store,
        }
    }

    /// Replace the environment layer. Mostly useful in tests.
    pub fn with_env(mut self, env: Arc<dyn SettingsReader>) -> Self {
        self.env = env;
        self
    }

    /// Resolve an integer from `env_key`, then `store_key`, then `default`.
    pub fn get_int(&self, env_key: &str, store_key: &str, default: i64) -> i64 {
        if let Some(raw) = self.env.get_value(env_key) {
            return parse_int(env_key, &raw, default);
        }
        if let Some(raw) = self.store.as_ref().and_then(|s| s.get_value(store_key)) {
            return parse_int(store_key, &raw, default);
        }
        default
    }
}

impl Default for LayeredSettings {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Fixed in-memory settings.
    #[derive(Default)]
    pub(crate) struct MapSettings(pub HashMap<String, String>);

    impl MapSettings {
        pub(crate) fn with(pairs: &[(&str, &str)]) -> Self {
            Self(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl SettingsReader for MapSettings {
        fn get_value(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    #[test]
    fn test_env_layer_wins() {
        let settings = LayeredSettings::new(Some(Arc::new(MapSettings::with(&[(
            "ta_my_cache_ttl_seconds",
            "120",
        )]))))
        .with_env(Arc::new(MapSettings::with(&[("TA_MY_CACHE_TTL_SECONDS", "60")])));

        assert_eq!(
            settings.get_int("TA_MY_CACHE_TTL_SECONDS", "ta_my_cache_ttl_seconds", 3600),
            60
        );
    }

    #[test]
    fn test_store_layer_used_when_env_missing() {
        let settings = LayeredSettings::new(Some(Arc::new(MapSettings::with(&[(
            "ta_my_cache_ttl_seconds",
            "120",
        )]))))
        .with_env(Arc::new(MapSettings::default()));

        assert_eq!(
            settings.get_int("TA_MY_CACHE_TTL_SECONDS", "ta_my_cache_ttl_seconds", 3600),
            120
        );
    }

    #[test]
    fn test_default_when_unset_or_invalid() {
        let settings = LayeredSettings::new(None)
            .with_env(Arc::new(MapSettings::with(&[("TA_MY_RATE_LIMIT_WAIT_SECONDS", "two")])));

        assert_eq!(
            settings.get_int("TA_MY_RATE_LIMIT_WAIT_SECONDS", "ta_my_rate_limit_wait_seconds", 2),
            2
        );
        assert_eq!(settings.get_int("MISSING", "missing", 7), 7);
    }

    #[test]
    fn test_reader_get_int() {
        let reader = MapSettings::with(&[("a", " 42 "), ("b", "x")]);
        assert_eq!(reader.get_int("a", 0), 42);
        assert_eq!(reader.get_int("b", 5), 5);
        assert_eq!(reader.get_int("c", 9), 9);
    }
}
