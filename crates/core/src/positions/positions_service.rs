use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

use super::positions_model::{ClosedPosition, PositionsSummary, SaleRequest};
use super::positions_traits::{ClosedPositionRepositoryTrait, ClosedPositionServiceTrait};
use crate::errors::Result;
use crate::portfolio::metrics::{aggregate_positions, settle_sale};
use crate::purchases::PurchaseRepositoryTrait;
use crate::utils::time_utils;

/// Service for selling purchases and managing the closed-positions ledger.
pub struct ClosedPositionService {
    purchase_repository: Arc<dyn PurchaseRepositoryTrait>,
    closed_position_repository: Arc<dyn ClosedPositionRepositoryTrait>,
    cagr_start: NaiveDate,
}

impl ClosedPositionService {
    pub fn new(
        purchase_repository: Arc<dyn PurchaseRepositoryTrait>,
        closed_position_repository: Arc<dyn ClosedPositionRepositoryTrait>,
        cagr_start: NaiveDate,
    ) -> Self {
        Self {
            purchase_repository,
            closed_position_repository,
            cagr_start,
        }
    }
}

#[async_trait]
impl ClosedPositionServiceTrait for ClosedPositionService {
    fn get_closed_positions(&self) -> Result<Vec<ClosedPosition>> {
        self.closed_position_repository.list()
    }

    fn get_summary(&self) -> Result<PositionsSummary> {
        let closed = self.closed_position_repository.list()?;
        Ok(aggregate_positions(&closed, self.cagr_start))
    }

    async fn sell_purchase(&self, purchase_id: &str, sale: SaleRequest) -> Result<ClosedPosition> {
        sale.validate(time_utils::today())?;

        let purchase = self.purchase_repository.get_by_id(purchase_id)?;
        if sale.sell_date < purchase.buy_date {
            // Kept as entered; days held comes out negative.
            warn!(
                "Sale of {} dated {} precedes its buy date {}",
                purchase.id, sale.sell_date, purchase.buy_date
            );
        }

        let closed = settle_sale(&purchase, sale.sell_date, sale.sell_price);
        debug!(
            "Settling {}: gain {} over {} days",
            closed.id, closed.gain, closed.days_held
        );

        let settled = self.closed_position_repository.settle(closed).await?;
        info!("Sold purchase {} ({})", settled.id, settled.name);
        Ok(settled)
    }

    async fn delete_closed_position(&self, position_id: &str) -> Result<()> {
        let removed = self.closed_position_repository.remove(position_id).await?;
        if removed == 0 {
            return Err(crate::Error::not_found(format!(
                "closed position {}",
                position_id
            )));
        }
        info!("Deleted closed position {}", position_id);
        Ok(())
    }
}
