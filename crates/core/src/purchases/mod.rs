//! Purchases module - active (unsold) positions, their service and traits.

mod purchases_model;
mod purchases_service;
mod purchases_traits;


pub use purchases_model::{ActivePurchase, NewPurchase};
pub use purchases_service::PurchaseService;
pub use purchases_traits::{PurchaseRepositoryTrait, PurchaseServiceTrait};
