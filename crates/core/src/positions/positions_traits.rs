use async_trait::async_trait;

use crate::errors::Result;
use crate::positions::positions_model::{ClosedPosition, PositionsSummary, SaleRequest};

/// Trait for closed position storage.
#[async_trait]
pub trait ClosedPositionRepositoryTrait: Send + Sync {
    /// All closed positions in settlement order.
    fn list(&self) -> Result<Vec<ClosedPosition>>;

    /// Moves a purchase into the closed ledger as one serialized unit.
    ///
    /// Removes the active purchase whose id equals `closed.id` and appends
    /// `closed`. Fails with NotFound, changing nothing, when that purchase is
    /// no longer active, so a purchase settles at most once. Fails with a
    /// unique violation when the closed ledger already holds `closed.id`.
    /// Any failure leaves both ledgers as they were.
    async fn settle(&self, closed: ClosedPosition) -> Result<ClosedPosition>;

    /// Permanently deletes a closed position. Returns the number of rows removed.
    async fn remove(&self, position_id: &str) -> Result<usize>;
}

/// Trait for closed position service operations
#[async_trait]
pub trait ClosedPositionServiceTrait: Send + Sync {
    fn get_closed_positions(&self) -> Result<Vec<ClosedPosition>>;
    fn get_summary(&self) -> Result<PositionsSummary>;
    async fn sell_purchase(&self, purchase_id: &str, sale: SaleRequest) -> Result<ClosedPosition>;
    async fn delete_closed_position(&self, position_id: &str) -> Result<()>;
}
