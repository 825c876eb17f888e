use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use crate::errors::Result;
use crate::portfolio::metrics::{compute_portfolio_view, portfolio_totals};
use crate::portfolio::portfolio_model::PortfolioView;
use crate::purchases::PurchaseRepositoryTrait;
use crate::quotes::PriceServiceTrait;
use tickerbook_market_data::PriceMap;

#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Values every active purchase against the current prices.
    ///
    /// If prices cannot be obtained at all, the view is still returned with
    /// every holding valued at zero.
    async fn get_portfolio_view(&self) -> Result<PortfolioView>;
}

pub struct PortfolioService {
    purchase_repository: Arc<dyn PurchaseRepositoryTrait>,
    price_service: Arc<dyn PriceServiceTrait>,
}

impl PortfolioService {
    pub fn new(
        purchase_repository: Arc<dyn PurchaseRepositoryTrait>,
        price_service: Arc<dyn PriceServiceTrait>,
    ) -> Self {
        Self {
            purchase_repository,
            price_service,
        }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn get_portfolio_view(&self) -> Result<PortfolioView> {
        let purchases = self.purchase_repository.list()?;

        let (prices, prices_as_of, price_source) = match self.price_service.get_prices().await {
            Ok(snapshot) => (
                snapshot.prices,
                Some(snapshot.fetched_at),
                Some(snapshot.source),
            ),
            Err(e) => {
                warn!("Prices unavailable, valuing portfolio at zero: {}", e);
                (PriceMap::new(), None, None)
            }
        };

        let items = compute_portfolio_view(&purchases, &prices);
        let totals = portfolio_totals(&items);
        debug!(
            "Portfolio view: {} items, current value {}",
            items.len(),
            totals.total_current_value
        );

        Ok(PortfolioView {
            items,
            totals,
            prices_as_of,
            price_source,
        })
    }
}
