use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::purchases_model::{ActivePurchase, NewPurchase};
use super::purchases_traits::{PurchaseRepositoryTrait, PurchaseServiceTrait};
use crate::errors::Result;
use crate::quotes::PriceServiceTrait;
use crate::utils::time_utils;

/// Service for recording and listing active purchases.
pub struct PurchaseService {
    repository: Arc<dyn PurchaseRepositoryTrait>,
    price_service: Arc<dyn PriceServiceTrait>,
}

impl PurchaseService {
    pub fn new(
        repository: Arc<dyn PurchaseRepositoryTrait>,
        price_service: Arc<dyn PriceServiceTrait>,
    ) -> Self {
        Self {
            repository,
            price_service,
        }
    }
}

#[async_trait]
impl PurchaseServiceTrait for PurchaseService {
    fn get_purchases(&self) -> Result<Vec<ActivePurchase>> {
        self.repository.list()
    }

    fn get_purchase(&self, purchase_id: &str) -> Result<ActivePurchase> {
        self.repository.get_by_id(purchase_id)
    }

    async fn add_purchase(&self, new_purchase: NewPurchase) -> Result<ActivePurchase> {
        let known_names = self.price_service.get_known_names().await?;
        new_purchase.validate(&known_names, time_utils::today())?;

        // Time-ordered v7 id derived from the creation timestamp.
        let purchase = new_purchase.into_purchase(Uuid::now_v7().to_string());
        debug!(
            "Recording purchase {} of {} x {} @ {}",
            purchase.id, purchase.name, purchase.quantity, purchase.buy_price
        );

        let stored = self.repository.append(purchase).await?;
        info!("Added purchase {} ({})", stored.id, stored.name);
        Ok(stored)
    }
}
