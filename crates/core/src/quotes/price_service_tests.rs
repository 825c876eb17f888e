//! Unit tests for the cached price service.

use super::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tickerbook_market_data::{MarketDataError, PriceMap, PriceProvider, PriceSnapshot};

// ============================================================================
// Mock Provider
// ============================================================================

struct CountingProvider {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl CountingProvider {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl PriceProvider for CountingProvider {
    fn id(&self) -> &'static str {
        "COUNTING"
    }

    async fn fetch_prices(&self) -> std::result::Result<PriceSnapshot, MarketDataError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(MarketDataError::Timeout {
                provider: "COUNTING".to_string(),
            });
        }

        let mut prices = PriceMap::new();
        prices.insert("TCS".to_string(), 3500.0 + call as f64);
        prices.insert("INFY".to_string(), 1500.0);
        Ok(PriceSnapshot::new(prices, "COUNTING"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_serves_cached_snapshot_within_window() {
    let provider = CountingProvider::new();
    let service = PriceService::new(provider.clone(), Duration::from_secs(300));

    let first = service.get_prices().await.unwrap();
    let second = service.get_prices().await.unwrap();

    assert_eq!(provider.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(first.prices.get("TCS").copied(), Some(3501.0));
}

#[tokio::test]
async fn test_refetches_when_stale() {
    let provider = CountingProvider::new();
    let service = PriceService::new(provider.clone(), Duration::ZERO);

    service.get_prices().await.unwrap();
    let second = service.get_prices().await.unwrap();

    assert_eq!(provider.calls(), 2);
    assert_eq!(second.prices.get("TCS").copied(), Some(3502.0));
}

#[tokio::test]
async fn test_refresh_ignores_cache_age() {
    let provider = CountingProvider::new();
    let service = PriceService::new(provider.clone(), Duration::from_secs(300));

    service.get_prices().await.unwrap();
    let refreshed = service.refresh_prices().await.unwrap();
    let cached = service.get_prices().await.unwrap();

    assert_eq!(provider.calls(), 2);
    assert_eq!(refreshed.prices.get("TCS").copied(), Some(3502.0));
    assert_eq!(cached, refreshed);
}

#[tokio::test]
async fn test_failed_refresh_serves_stale_snapshot() {
    let provider = CountingProvider::new();
    let service = PriceService::new(provider.clone(), Duration::ZERO);

    let fresh = service.get_prices().await.unwrap();
    provider.set_failing(true);
    let stale = service.get_prices().await.unwrap();

    assert_eq!(provider.calls(), 2);
    assert_eq!(stale, fresh);
}

#[tokio::test]
async fn test_failure_without_cache_is_an_error() {
    let provider = CountingProvider::new();
    provider.set_failing(true);
    let service = PriceService::new(provider.clone(), Duration::from_secs(300));

    let err = service.get_prices().await.unwrap_err();
    assert!(matches!(err, crate::Error::MarketData(MarketDataError::Timeout { .. })));
}

#[tokio::test]
async fn test_known_names_are_sorted() {
    let provider = CountingProvider::new();
    let service = PriceService::new(provider, Duration::from_secs(300));

    let names = service.get_known_names().await.unwrap();
    assert_eq!(names, vec!["INFY".to_string(), "TCS".to_string()]);
}
