use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::errors::Result;
use tickerbook_market_data::{PriceProvider, PriceSnapshot};

#[async_trait]
pub trait PriceServiceTrait: Send + Sync {
    /// Current prices, fetched again only when the cached snapshot is stale.
    async fn get_prices(&self) -> Result<PriceSnapshot>;

    /// Fetches from the provider regardless of the cache age.
    async fn refresh_prices(&self) -> Result<PriceSnapshot>;

    /// Stock names accepted for new purchases, sorted.
    async fn get_known_names(&self) -> Result<Vec<String>> {
        Ok(self.get_prices().await?.names())
    }
}

struct CachedSnapshot {
    snapshot: PriceSnapshot,
    loaded_at: Instant,
}

/// Price lookup with a time-based staleness window.
pub struct PriceService {
    provider: Arc<dyn PriceProvider>,
    refresh_interval: Duration,
    cache: Mutex<Option<CachedSnapshot>>,
}

impl PriceService {
    pub fn new(provider: Arc<dyn PriceProvider>, refresh_interval: Duration) -> Self {
        Self {
            provider,
            refresh_interval,
            cache: Mutex::new(None),
        }
    }

    /// Fetches and stores a new snapshot. Callers hold the cache lock.
    async fn load(&self, cache: &mut Option<CachedSnapshot>) -> Result<PriceSnapshot> {
        match self.provider.fetch_prices().await {
            Ok(snapshot) => {
                info!(
                    "Loaded {} prices from {}",
                    snapshot.prices.len(),
                    self.provider.id()
                );
                *cache = Some(CachedSnapshot {
                    snapshot: snapshot.clone(),
                    loaded_at: Instant::now(),
                });
                Ok(snapshot)
            }
            Err(e) => {
                if e.is_transient() {
                    warn!("Price refresh from {} failed: {}", self.provider.id(), e);
                } else {
                    error!("Price source {} is unusable: {}", self.provider.id(), e);
                }
                match cache.as_ref() {
                    Some(stale) => {
                        debug!("Serving snapshot from {}", stale.snapshot.fetched_at);
                        Ok(stale.snapshot.clone())
                    }
                    None => Err(e.into()),
                }
            }
        }
    }
}

#[async_trait]
impl PriceServiceTrait for PriceService {
    async fn get_prices(&self) -> Result<PriceSnapshot> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.loaded_at.elapsed() < self.refresh_interval {
                debug!("Serving cached prices from {}", cached.snapshot.fetched_at);
                return Ok(cached.snapshot.clone());
            }
        }
        self.load(&mut cache).await
    }

    async fn refresh_prices(&self) -> Result<PriceSnapshot> {
        let mut cache = self.cache.lock().await;
        self.load(&mut cache).await
    }
}
