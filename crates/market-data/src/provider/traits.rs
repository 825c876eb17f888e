//! Price provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::PriceSnapshot;

/// Trait for price providers.
///
/// Implement this trait to add support for a new price source. A provider
/// returns every price it knows in one call; names it does not know are
/// simply absent from the snapshot.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "SPREADSHEET" or "MOCK".
    /// Used for logging and stamped onto every snapshot.
    fn id(&self) -> &'static str;

    /// Fetch the current price of every known stock.
    async fn fetch_prices(&self) -> Result<PriceSnapshot, MarketDataError>;
}
