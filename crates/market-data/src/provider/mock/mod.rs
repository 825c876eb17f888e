//! Random-walk mock price provider.
//!
//! Every fetch moves each price by a normally distributed relative step,
//! so repeated portfolio views show prices drifting the way a live feed
//! would. Prices never drop below [`MIN_PRICE`].

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{PriceMap, PriceSnapshot};
use crate::provider::PriceProvider;

const PROVIDER_ID: &str = "MOCK";

/// Floor for simulated prices.
pub const MIN_PRICE: f64 = 0.01;

/// Default per-fetch standard deviation of the relative price step (1%).
pub const DEFAULT_VOLATILITY: f64 = 0.01;

/// Starting prices used when no universe is supplied.
pub const DEFAULT_UNIVERSE: &[(&str, f64)] = &[
    ("ASIANPAINT", 2850.0),
    ("BAJFINANCE", 6900.0),
    ("HDFCBANK", 1650.0),
    ("HINDUNILVR", 2400.0),
    ("ICICIBANK", 1100.0),
    ("INFY", 1500.0),
    ("ITC", 455.0),
    ("KOTAKBANK", 1750.0),
    ("LT", 3600.0),
    ("MARUTI", 12500.0),
    ("RELIANCE", 2900.0),
    ("SBIN", 780.0),
    ("TATAMOTORS", 950.0),
    ("TCS", 3500.0),
    ("WIPRO", 480.0),
];

struct WalkState {
    prices: PriceMap,
    rng: StdRng,
}

/// Price provider that simulates prices with a random walk.
pub struct MockPriceProvider {
    state: Mutex<WalkState>,
    step: Normal<f64>,
}

impl MockPriceProvider {
    /// Create a provider walking from the given starting prices.
    pub fn new(initial: PriceMap, volatility: f64) -> Result<Self, MarketDataError> {
        Self::build(initial, volatility, StdRng::from_entropy())
    }

    /// Same as [`MockPriceProvider::new`] with a fixed seed, for reproducible walks.
    pub fn with_seed(
        initial: PriceMap,
        volatility: f64,
        seed: u64,
    ) -> Result<Self, MarketDataError> {
        Self::build(initial, volatility, StdRng::seed_from_u64(seed))
    }

    /// Provider over [`DEFAULT_UNIVERSE`] with [`DEFAULT_VOLATILITY`].
    pub fn with_default_universe() -> Result<Self, MarketDataError> {
        Self::new(default_universe(), DEFAULT_VOLATILITY)
    }

    fn build(initial: PriceMap, volatility: f64, rng: StdRng) -> Result<Self, MarketDataError> {
        let step = Normal::new(0.0, volatility).map_err(|e| {
            MarketDataError::Configuration(format!("invalid mock volatility {}: {}", volatility, e))
        })?;

        let prices = initial
            .into_iter()
            .map(|(name, price)| (name, price.max(MIN_PRICE)))
            .collect();

        Ok(Self {
            state: Mutex::new(WalkState { prices, rng }),
            step,
        })
    }
}

/// [`DEFAULT_UNIVERSE`] as a price map.
pub fn default_universe() -> PriceMap {
    DEFAULT_UNIVERSE
        .iter()
        .map(|(name, price)| (name.to_string(), *price))
        .collect()
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_prices(&self) -> Result<PriceSnapshot, MarketDataError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "random walk state poisoned".to_string(),
            })?;

        let WalkState { prices, rng } = &mut *state;
        for price in prices.values_mut() {
            let factor = 1.0 + self.step.sample(rng);
            *price = (*price * factor).max(MIN_PRICE);
        }

        debug!("Mock provider advanced {} prices", prices.len());
        Ok(PriceSnapshot::new(prices.clone(), PROVIDER_ID))
    }
}
