//! Source-priority resolution.

use std::sync::Arc;

use log::{debug, warn};

use super::model::SourcePriorityEntry;
use super::store::SourcePriorityStore;
use crate::markets::Market;

/// Resolves the ordered list of sources to try for a market.
///
/// Configured groupings win; when they are missing or unreadable the
/// market's built-in default order is used. Lookup failures never
/// propagate.
#[derive(Clone)]
pub struct SourcePriorityResolver {
    store: Arc<dyn SourcePriorityStore>,
}

impl SourcePriorityResolver {
    pub fn new(store: Arc<dyn SourcePriorityStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, market: Market) -> Vec<String> {
        let category = market.category();

        match self.store.enabled_entries(category).await {
            Ok(entries) => {
                let sources = ordered_sources(entries);
                if !sources.is_empty() {
                    debug!("{} source priority (configured): {:?}", market, sources);
                    return sources;
                }
            }
            Err(e) => {
                warn!("Failed to read source priority for {}: {}", category, e);
            }
        }

        let sources: Vec<String> = market
            .default_sources()
            .iter()
            .map(|s| s.to_string())
            .collect();
        debug!("{} source priority (default): {:?}", market, sources);
        sources
    }

    /// Like [`resolve`](Self::resolve) for a raw market code. Unknown codes
    /// resolve to an empty list.
    pub async fn resolve_code(&self, market_code: &str) -> Vec<String> {
        match market_code.parse::<Market>() {
            Ok(market) => self.resolve(market).await,
            Err(_) => {
                debug!("No source priority for unknown market '{}'", market_code);
                Vec::new()
            }
        }
    }
}

/// Enabled source names, highest priority first. Ties keep store order.
fn ordered_sources(mut entries: Vec<SourcePriorityEntry>) -> Vec<String> {
    entries.retain(|e| e.enabled);
    entries.sort_by(|a, b| b.priority.cmp(&a.priority));
    entries.into_iter().map(|e| e.data_source_name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DatabaseError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockPriorityStore {
        entries: Vec<SourcePriorityEntry>,
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SourcePriorityStore for MockPriorityStore {
        async fn enabled_entries(&self, market_category: &str) -> Result<Vec<SourcePriorityEntry>> {
            self.calls.lock().unwrap().push(market_category.to_string());
            if self.fail {
                return Err(DatabaseError::ConnectionFailed("offline".to_string()).into());
            }
            Ok(self
                .entries
                .iter()
                .filter(|e| e.market_category_id == market_category && e.enabled)
                .cloned()
                .collect())
        }
    }

    fn resolver(store: MockPriorityStore) -> (SourcePriorityResolver, Arc<MockPriorityStore>) {
        let store = Arc::new(store);
        (SourcePriorityResolver::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_configured_entries_sorted_by_priority() {
        let (resolver, store) = resolver(MockPriorityStore {
            entries: vec![
                SourcePriorityEntry::new("a_shares", "akshare", 2, true),
                SourcePriorityEntry::new("a_shares", "tushare", 3, true),
                SourcePriorityEntry::new("a_shares", "baostock", 1, false),
                SourcePriorityEntry::new("hk_stocks", "akshare_hk", 9, true),
            ],
            ..Default::default()
        });

        assert_eq!(resolver.resolve(Market::Cn).await, vec!["tushare", "akshare"]);
        assert_eq!(store.calls.lock().unwrap().as_slice(), &["a_shares".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_configuration_uses_defaults() {
        let (resolver, _) = resolver(MockPriorityStore::default());

        assert_eq!(
            resolver.resolve(Market::Cn).await,
            vec!["tushare", "akshare", "baostock"]
        );
        assert_eq!(resolver.resolve(Market::Hk).await, vec!["yfinance_hk", "akshare_hk"]);
        assert_eq!(resolver.resolve(Market::Us).await, vec!["yfinance_us"]);
        assert_eq!(resolver.resolve(Market::My).await, vec!["yfinance_my"]);
    }

    #[tokio::test]
    async fn test_store_failure_uses_defaults() {
        let (resolver, _) = resolver(MockPriorityStore {
            entries: vec![SourcePriorityEntry::new("us_stocks", "alpaca", 5, true)],
            fail: true,
            ..Default::default()
        });

        assert_eq!(resolver.resolve(Market::Us).await, vec!["yfinance_us"]);
    }

    #[tokio::test]
    async fn test_resolve_code() {
        let (resolver, store) = resolver(MockPriorityStore::default());

        assert_eq!(resolver.resolve_code("hk").await, vec!["yfinance_hk", "akshare_hk"]);
        assert!(resolver.resolve_code("JP").await.is_empty());
        assert_eq!(store.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_ordered_sources_ties_keep_store_order() {
        let sources = ordered_sources(vec![
            SourcePriorityEntry::new("a_shares", "b", 1, true),
            SourcePriorityEntry::new("a_shares", "a", 1, true),
            SourcePriorityEntry::new("a_shares", "c", 2, true),
        ]);
        assert_eq!(sources, vec!["c", "b", "a"]);
    }
}
