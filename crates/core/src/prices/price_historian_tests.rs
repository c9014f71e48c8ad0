use async_trait::async_trait;
use futures::future;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hodlvault_market_data::{HistoricalPriceSource, MarketDataError, PriceQuery, SourceRegistry};

use super::{HistorianConfig, MockedPrices, PriceError, PriceHistorian, PriceHistorianHandle};
use crate::errors::Error;

const JAN_2016: i64 = 1_451_606_400;

struct CountingSource {
    answer: Option<Decimal>,
    delay: Duration,
    calls: AtomicUsize,
}

impl CountingSource {
    fn answering(answer: Option<Decimal>) -> Arc<Self> {
        Self::slow(answer, Duration::ZERO)
    }

    fn slow(answer: Option<Decimal>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            answer,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoricalPriceSource for CountingSource {
    fn id(&self) -> &'static str {
        "COUNTING"
    }

    async fn fetch(&self, _query: &PriceQuery) -> Result<Option<Decimal>, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.answer)
    }
}

fn config() -> HistorianConfig {
    HistorianConfig::from_start_date("01/01/2015").unwrap()
}

fn live(source: &Arc<CountingSource>) -> PriceHistorian {
    let source: Arc<dyn HistoricalPriceSource> = source.clone();
    PriceHistorian::new(config(), Arc::new(SourceRegistry::new(vec![source])))
}

fn mocked() -> PriceHistorian {
    let mut prices = MockedPrices::new();
    prices
        .insert("ETH", "EUR", JAN_2016, dec!(0.8633))
        .insert("BTC", "EUR", JAN_2016, dec!(396.56));
    PriceHistorian::mocked(config(), prices)
}

#[tokio::test]
async fn test_identity_query_is_one_without_lookup() {
    let source = CountingSource::answering(Some(dec!(5)));
    let historian = live(&source);

    for ts in [0, JAN_2016, i64::MAX] {
        let price = historian.query_historical_price("BTC", "BTC", ts).await.unwrap();
        assert_eq!(price, Decimal::ONE);
    }
    assert_eq!(source.calls(), 0);
    assert_eq!(historian.cached_prices(), 0);
}

#[tokio::test]
async fn test_second_query_is_served_from_cache() {
    let source = CountingSource::answering(Some(dec!(430.12)));
    let historian = live(&source);

    let first = historian.query_historical_price("BTC", "USD", JAN_2016).await.unwrap();
    let second = historian.query_historical_price("BTC", "USD", JAN_2016).await.unwrap();

    assert_eq!(first, dec!(430.12));
    assert_eq!(second, dec!(430.12));
    assert_eq!(source.calls(), 1);
    assert_eq!(historian.cached_prices(), 1);

    historian.clear_cache();
    assert_eq!(historian.cached_prices(), 0);
    historian.query_historical_price("BTC", "USD", JAN_2016).await.unwrap();
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_unresolved_price_is_an_error() {
    let source = CountingSource::answering(None);
    let historian = live(&source);

    let err = historian
        .query_historical_price("XYZ", "USD", JAN_2016)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Price(PriceError::PriceNotFound { ref from, ref to, timestamp })
            if from == "XYZ" && to == "USD" && timestamp == JAN_2016
    ));
    assert_eq!(historian.cached_prices(), 0);
}

#[tokio::test]
async fn test_empty_registry_surfaces_source_error() {
    let historian = PriceHistorian::new(config(), Arc::new(SourceRegistry::new(vec![])));
    let err = historian
        .query_historical_price("BTC", "USD", JAN_2016)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Price(PriceError::Source(MarketDataError::NoSourcesAvailable))
    ));
}

#[tokio::test]
async fn test_query_before_history_start_is_rejected() {
    let source = CountingSource::answering(Some(dec!(1)));
    let historian = live(&source);

    let err = historian
        .query_historical_price("BTC", "USD", 1_400_000_000)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Price(PriceError::BeforeHistoryStart { history_start: 1_420_070_400, .. })
    ));
    assert_eq!(source.calls(), 0);

    let err = mocked()
        .query_historical_price("ETH", "EUR", 1_400_000_000)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Price(PriceError::BeforeHistoryStart { .. })));
}

#[tokio::test]
async fn test_mocked_exact_match() {
    let historian = mocked();
    assert!(historian.is_mocked());

    let price = historian.query_historical_price("ETH", "EUR", JAN_2016).await.unwrap();
    assert_eq!(price, dec!(0.8633));
}

#[tokio::test]
async fn test_mocked_miss_names_the_triple() {
    let historian = mocked();

    let err = historian
        .query_historical_price("ETH", "EUR", JAN_2016 + 1)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "Price resolution failed: No mocked price found from ETH to EUR at {}",
            JAN_2016 + 1
        )
    );

    let err = historian
        .query_historical_price("ETH", "USD", JAN_2016)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Price(PriceError::MockPriceMiss { .. })));
}

#[tokio::test]
async fn test_mocked_prices_from_json() {
    let prices = MockedPrices::from_json(
        r#"{
            "ETH": {"EUR": {"1451606400": 0.5, "1451692800": 1.25}},
            "BTC": {"USD": {"1451606400": 430}}
        }"#,
    )
    .unwrap();
    assert_eq!(prices.len(), 3);

    let historian = PriceHistorian::mocked(config(), prices);
    let price = historian.query_historical_price("ETH", "EUR", 1_451_692_800).await.unwrap();
    assert_eq!(price, dec!(1.25));
    let price = historian.query_historical_price("BTC", "USD", JAN_2016).await.unwrap();
    assert_eq!(price, dec!(430));
}

#[test]
fn test_mocked_prices_rejects_malformed_json() {
    let err = MockedPrices::from_json(r#"{"ETH": {"EUR": {"not-a-time": 1}}}"#).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test(start_paused = true)]
async fn test_slow_source_times_out_without_caching() {
    let source = CountingSource::slow(Some(dec!(1)), Duration::from_secs(60));
    let source_dyn: Arc<dyn HistoricalPriceSource> = source.clone();
    let historian = PriceHistorian::new(
        config().with_fetch_timeout(Duration::from_secs(5)),
        Arc::new(SourceRegistry::new(vec![source_dyn])),
    );

    let err = historian
        .query_historical_price("BTC", "USD", JAN_2016)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Price(PriceError::Timeout { after_ms: 5000, .. })
    ));
    assert_eq!(historian.cached_prices(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_lookup_leaves_cache_untouched() {
    let source = CountingSource::slow(Some(dec!(1)), Duration::from_secs(10));
    let historian = live(&source);

    let err = historian
        .query_historical_price_until(
            "BTC",
            "USD",
            JAN_2016,
            tokio::time::sleep(Duration::from_secs(1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Price(PriceError::Cancelled(_))));
    assert_eq!(historian.cached_prices(), 0);
    assert_eq!(historian.pending_fetches(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_lookups_do_not_accumulate() {
    let source = CountingSource::slow(Some(dec!(1)), Duration::from_secs(10));
    let historian = live(&source);

    for offset in 0..100 {
        let err = historian
            .query_historical_price_until("BTC", "USD", JAN_2016 + offset, future::ready(()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Price(PriceError::Cancelled(_))));
    }
    assert_eq!(historian.pending_fetches(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_lookup_releases_fetch() {
    let source = CountingSource::slow(Some(dec!(1)), Duration::from_secs(10));
    let historian = live(&source);

    let abandoned = tokio::time::timeout(
        Duration::from_secs(1),
        historian.query_historical_price("BTC", "USD", JAN_2016),
    )
    .await;
    assert!(abandoned.is_err());
    assert_eq!(historian.pending_fetches(), 0);
    assert_eq!(historian.cached_prices(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_waiter_keeps_shared_fetch_for_others() {
    let source = CountingSource::slow(Some(dec!(3)), Duration::from_secs(2));
    let historian = live(&source);

    let (patient, impatient) = tokio::join!(
        historian.query_historical_price("ETH", "USD", JAN_2016),
        historian.query_historical_price_until(
            "ETH",
            "USD",
            JAN_2016,
            tokio::time::sleep(Duration::from_secs(1)),
        ),
    );

    assert_eq!(patient.unwrap(), dec!(3));
    assert!(matches!(impatient, Err(Error::Price(PriceError::Cancelled(_)))));
    assert_eq!(source.calls(), 1);
    assert_eq!(historian.pending_fetches(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_misses_share_one_fetch() {
    let source = CountingSource::slow(Some(dec!(7)), Duration::from_secs(1));
    let historian = live(&source);

    let (a, b, c) = tokio::join!(
        historian.query_historical_price("ETH", "USD", JAN_2016),
        historian.query_historical_price("ETH", "USD", JAN_2016),
        historian.query_historical_price("ETH", "USD", JAN_2016),
    );

    assert_eq!(a.unwrap(), dec!(7));
    assert_eq!(b.unwrap(), dec!(7));
    assert_eq!(c.unwrap(), dec!(7));
    assert_eq!(source.calls(), 1);
    assert_eq!(historian.cached_prices(), 1);
    assert_eq!(historian.pending_fetches(), 0);
}

#[test]
fn test_handle_lifecycle() {
    let handle = PriceHistorianHandle::new();
    assert!(!handle.is_initialized());
    assert!(matches!(
        handle.get(),
        Err(Error::Price(PriceError::NotInitialized))
    ));

    handle.init(mocked()).unwrap();
    assert!(handle.get().unwrap().is_mocked());
    assert!(matches!(
        handle.init(mocked()),
        Err(Error::Price(PriceError::AlreadyInitialized))
    ));

    let previous = handle.reset();
    assert!(previous.is_some());
    assert!(!handle.is_initialized());

    let source = CountingSource::answering(None);
    handle.init(live(&source)).unwrap();
    assert!(!handle.get().unwrap().is_mocked());
}

#[tokio::test]
async fn test_reset_discards_cached_state() {
    let handle = PriceHistorianHandle::new();
    let source = CountingSource::answering(Some(dec!(2)));

    let historian = handle.init(live(&source)).unwrap();
    historian.query_historical_price("BTC", "USD", JAN_2016).await.unwrap();
    assert_eq!(historian.cached_prices(), 1);
    drop(historian);

    handle.reset();
    let fresh = handle.init(live(&source)).unwrap();
    assert_eq!(fresh.cached_prices(), 0);
}

proptest! {
    #[test]
    fn prop_mocked_lookup_is_exact(
        stored in 1_420_070_400i64..2_000_000_000,
        offset in 1i64..86_400,
        cents in 1i64..10_000_000,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let mut prices = MockedPrices::new();
        prices.insert("BTC", "USD", stored, Decimal::new(cents, 2));
        let historian = PriceHistorian::mocked(config(), prices);

        let hit = runtime.block_on(historian.query_historical_price("BTC", "USD", stored));
        prop_assert_eq!(hit.unwrap(), Decimal::new(cents, 2));

        let miss =
            runtime.block_on(historian.query_historical_price("BTC", "USD", stored + offset));
        let is_mock_miss = matches!(miss, Err(Error::Price(PriceError::MockPriceMiss { .. })));
        prop_assert!(is_mock_miss);
    }
}
