//! Source registry for orchestrating historical price sources.
//!
//! The registry manages multiple sources, handling:
//! - Priority ordering (lower value first, ties broken by registration order)
//! - Fallback to the next source on a miss or a recoverable failure
//! - Early exit on terminal errors

use std::borrow::Cow;
use std::sync::Arc;

use log::{debug, warn};

use crate::errors::{MarketDataError, RetryClass};
use crate::models::{HistoricalPrice, PriceQuery, SourceId};
use crate::provider::HistoricalPriceSource;

/// Source registry for resolving historical prices.
pub struct SourceRegistry {
    sources: Vec<Arc<dyn HistoricalPriceSource>>,
}

impl SourceRegistry {
    /// Create a new registry. Sources are kept sorted by priority.
    pub fn new(mut sources: Vec<Arc<dyn HistoricalPriceSource>>) -> Self {
        // sort_by_key is stable, so equal priorities keep registration order
        sources.sort_by_key(|s| s.priority());
        Self { sources }
    }

    /// Registered source ids in the order they will be tried.
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| Cow::Borrowed(s.id())).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolve a price by asking each source in turn.
    ///
    /// Returns `Ok(None)` when every source missed or failed over, and `Err`
    /// only for terminal failures or an empty registry.
    pub async fn fetch(
        &self,
        query: &PriceQuery,
    ) -> Result<Option<HistoricalPrice>, MarketDataError> {
        if self.sources.is_empty() {
            warn!("No price sources registered, cannot resolve {}", query);
            return Err(MarketDataError::NoSourcesAvailable);
        }

        for source in &self.sources {
            let source_id: SourceId = Cow::Borrowed(source.id());
            debug!("Querying source '{}' for {}", source_id, query);

            match source.fetch(query).await {
                Ok(Some(price)) => {
                    debug!("Source '{}' resolved {} = {}", source_id, query, price);
                    return Ok(Some(HistoricalPrice {
                        query: query.clone(),
                        price,
                        source: source_id,
                    }));
                }
                Ok(None) => {
                    debug!("Source '{}' has no price for {}", source_id, query);
                }
                Err(e) => match e.retry_class() {
                    RetryClass::Never => {
                        debug!(
                            "Terminal error from '{}' for {}: {:?}, not trying other sources",
                            source_id, query, e
                        );
                        return Err(e);
                    }
                    RetryClass::NextSource => {
                        warn!(
                            "Source '{}' failed for {}: {}, trying next source",
                            source_id, query, e
                        );
                    }
                },
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        id: &'static str,
        priority: u8,
        answer: Result<Option<Decimal>, MarketDataError>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(
            id: &'static str,
            priority: u8,
            answer: Result<Option<Decimal>, MarketDataError>,
        ) -> Arc<Self> {
            Arc::new(Self {
                id,
                priority,
                answer,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl HistoricalPriceSource for FixedSource {
        fn id(&self) -> &'static str {
            self.id
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        async fn fetch(&self, _query: &PriceQuery) -> Result<Option<Decimal>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    fn dyn_source(source: &Arc<FixedSource>) -> Arc<dyn HistoricalPriceSource> {
        source.clone()
    }

    fn query() -> PriceQuery {
        PriceQuery::new("BTC", "USD", 1_500_000_000)
    }

    #[tokio::test]
    async fn test_empty_registry_fails() {
        let registry = SourceRegistry::new(vec![]);
        assert!(registry.is_empty());
        let err = registry.fetch(&query()).await.unwrap_err();
        assert_eq!(err, MarketDataError::NoSourcesAvailable);
    }

    #[tokio::test]
    async fn test_sources_tried_in_priority_order() {
        let slow = FixedSource::new("SLOW", 20, Ok(Some(dec!(2))));
        let fast = FixedSource::new("FAST", 1, Ok(Some(dec!(1))));
        let registry = SourceRegistry::new(vec![dyn_source(&slow), dyn_source(&fast)]);

        assert_eq!(registry.source_ids(), vec!["FAST", "SLOW"]);

        let price = registry.fetch(&query()).await.unwrap().unwrap();
        assert_eq!(price.price, dec!(1));
        assert_eq!(price.source, "FAST");
        assert_eq!(slow.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_miss_falls_through_to_next_source() {
        let first = FixedSource::new("FIRST", 1, Ok(None));
        let second = FixedSource::new("SECOND", 2, Ok(Some(dec!(6500.25))));
        let registry = SourceRegistry::new(vec![dyn_source(&first), dyn_source(&second)]);

        let price = registry.fetch(&query()).await.unwrap().unwrap();
        assert_eq!(price.price, dec!(6500.25));
        assert_eq!(price.source, "SECOND");
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recoverable_error_falls_through() {
        let broken = FixedSource::new(
            "BROKEN",
            1,
            Err(MarketDataError::SourceError {
                source_id: "BROKEN".to_string(),
                message: "503".to_string(),
            }),
        );
        let backup = FixedSource::new("BACKUP", 2, Ok(Some(dec!(10))));
        let registry = SourceRegistry::new(vec![dyn_source(&broken), dyn_source(&backup)]);

        let price = registry.fetch(&query()).await.unwrap().unwrap();
        assert_eq!(price.source, "BACKUP");
    }

    #[tokio::test]
    async fn test_terminal_error_stops_lookup() {
        let strict = FixedSource::new(
            "STRICT",
            1,
            Err(MarketDataError::InvalidQuery("negative timestamp".to_string())),
        );
        let backup = FixedSource::new("BACKUP", 2, Ok(Some(dec!(10))));
        let registry = SourceRegistry::new(vec![dyn_source(&strict), dyn_source(&backup)]);

        let err = registry.fetch(&query()).await.unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidQuery(_)));
        assert_eq!(backup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_sources_missing_is_none() {
        let a = FixedSource::new("A", 1, Ok(None));
        let b = FixedSource::new(
            "B",
            2,
            Err(MarketDataError::RateLimited {
                source_id: "B".to_string(),
            }),
        );
        let registry = SourceRegistry::new(vec![dyn_source(&a), dyn_source(&b)]);

        assert!(registry.fetch(&query()).await.unwrap().is_none());
    }
}
