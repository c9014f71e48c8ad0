use dashmap::DashMap;
use futures::future::{self, BoxFuture, FutureExt, Shared};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::future::Future;
use std::sync::Arc;

use hodlvault_market_data::{PriceQuery, SourceRegistry};

use super::{HistorianConfig, MockedPrices, PriceError};
use crate::errors::Result;

type SharedFetch = Shared<BoxFuture<'static, std::result::Result<Decimal, PriceError>>>;

/// Where prices come from.
pub enum PriceSourceMode {
    /// Remote sources, tried in priority order.
    Live(Arc<SourceRegistry>),
    /// Exact-match lookups in a preloaded table. Never touches the network.
    Mocked(MockedPrices),
}

/// Resolves the price of one asset in another at a historical timestamp.
///
/// Resolved remote prices are cached per `(from, to, timestamp)`; concurrent
/// misses for the same key share one fetch.
pub struct PriceHistorian {
    config: HistorianConfig,
    mode: PriceSourceMode,
    cache: DashMap<PriceQuery, Decimal>,
    in_flight: DashMap<PriceQuery, SharedFetch>,
}

impl PriceHistorian {
    pub fn new(config: HistorianConfig, registry: Arc<SourceRegistry>) -> Self {
        Self::with_mode(config, PriceSourceMode::Live(registry))
    }

    pub fn mocked(config: HistorianConfig, prices: MockedPrices) -> Self {
        Self::with_mode(config, PriceSourceMode::Mocked(prices))
    }

    pub fn with_mode(config: HistorianConfig, mode: PriceSourceMode) -> Self {
        Self {
            config,
            mode,
            cache: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    pub fn config(&self) -> &HistorianConfig {
        &self.config
    }

    pub fn is_mocked(&self) -> bool {
        matches!(self.mode, PriceSourceMode::Mocked(_))
    }

    /// Price of `from_asset` in `to_asset` at `timestamp`.
    ///
    /// Identical assets are worth exactly one at any time, without a lookup.
    pub async fn query_historical_price(
        &self,
        from_asset: &str,
        to_asset: &str,
        timestamp: i64,
    ) -> Result<Decimal> {
        self.query_historical_price_until(from_asset, to_asset, timestamp, future::pending())
            .await
    }

    /// Like [`query_historical_price`](Self::query_historical_price), but gives
    /// up with [`PriceError::Cancelled`] once `cancel` resolves.
    pub async fn query_historical_price_until<C>(
        &self,
        from_asset: &str,
        to_asset: &str,
        timestamp: i64,
        cancel: C,
    ) -> Result<Decimal>
    where
        C: Future<Output = ()>,
    {
        let query = PriceQuery::new(from_asset, to_asset, timestamp);
        if query.is_identity() {
            return Ok(Decimal::ONE);
        }

        if timestamp < self.config.history_start {
            return Err(PriceError::BeforeHistoryStart {
                timestamp,
                history_start: self.config.history_start,
            }
            .into());
        }

        if let Some(price) = self.cache.get(&query) {
            debug!("Price cache hit for {}", query);
            return Ok(*price);
        }

        match &self.mode {
            PriceSourceMode::Mocked(prices) => prices
                .get(&query)
                .ok_or_else(|| PriceError::mock_miss(&query).into()),
            PriceSourceMode::Live(registry) => {
                debug!("Price cache miss for {}", query);
                let fetch = self.shared_fetch(registry, &query);
                let _waiter = InFlightWaiter {
                    in_flight: &self.in_flight,
                    query: query.clone(),
                    fetch: Some(fetch.clone()),
                };

                tokio::select! {
                    result = fetch => {
                        if let Ok(price) = &result {
                            self.cache.insert(query, *price);
                        }
                        Ok(result?)
                    }
                    _ = cancel => {
                        debug!("Price lookup for {} cancelled by caller", query);
                        Err(PriceError::Cancelled(query).into())
                    }
                }
            }
        }
    }

    /// Number of cached prices.
    pub fn cached_prices(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    #[cfg(test)]
    pub(crate) fn pending_fetches(&self) -> usize {
        self.in_flight.len()
    }

    fn shared_fetch(&self, registry: &Arc<SourceRegistry>, query: &PriceQuery) -> SharedFetch {
        self.in_flight
            .entry(query.clone())
            .or_insert_with(|| {
                let registry = Arc::clone(registry);
                let query = query.clone();
                let fetch_timeout = self.config.fetch_timeout;

                async move {
                    match tokio::time::timeout(fetch_timeout, registry.fetch(&query)).await {
                        Ok(Ok(Some(resolved))) => Ok(resolved.price),
                        Ok(Ok(None)) => Err(PriceError::not_found(&query)),
                        Ok(Err(e)) => Err(PriceError::Source(e)),
                        Err(_) => {
                            warn!(
                                "Price lookup for {} timed out after {:?}",
                                query, fetch_timeout
                            );
                            Err(PriceError::Timeout {
                                after_ms: fetch_timeout.as_millis() as u64,
                                query,
                            })
                        }
                    }
                }
                .boxed()
                .shared()
            })
            .value()
            .clone()
    }
}

/// One caller's interest in a shared fetch.
///
/// Dropping the last waiter removes the in-flight entry, so a settled,
/// cancelled or abandoned fetch never outlives its callers.
struct InFlightWaiter<'a> {
    in_flight: &'a DashMap<PriceQuery, SharedFetch>,
    query: PriceQuery,
    fetch: Option<SharedFetch>,
}

impl Drop for InFlightWaiter<'_> {
    fn drop(&mut self) {
        let Some(fetch) = self.fetch.take() else {
            return;
        };
        // Our handle is released under the shard lock. The entry goes once
        // only the map's own handle remains.
        self.in_flight.remove_if(&self.query, move |_, pending| {
            let same = pending.ptr_eq(&fetch);
            drop(fetch);
            same && pending.strong_count() == Some(1)
        });
    }
}
