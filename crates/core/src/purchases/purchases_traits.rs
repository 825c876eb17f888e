use async_trait::async_trait;

use crate::errors::Result;
use crate::purchases::purchases_model::{ActivePurchase, NewPurchase};

/// Trait for active purchase storage.
#[async_trait]
pub trait PurchaseRepositoryTrait: Send + Sync {
    /// All active purchases in insertion order.
    fn list(&self) -> Result<Vec<ActivePurchase>>;

    /// The purchase with `purchase_id`, or a NotFound database error.
    fn get_by_id(&self, purchase_id: &str) -> Result<ActivePurchase>;

    /// Stores a new purchase. Fails with a unique violation if the id exists.
    async fn append(&self, purchase: ActivePurchase) -> Result<ActivePurchase>;
}

/// Trait for purchase service operations
#[async_trait]
pub trait PurchaseServiceTrait: Send + Sync {
    fn get_purchases(&self) -> Result<Vec<ActivePurchase>>;
    fn get_purchase(&self, purchase_id: &str) -> Result<ActivePurchase>;
    async fn add_purchase(&self, new_purchase: NewPurchase) -> Result<ActivePurchase>;
}
