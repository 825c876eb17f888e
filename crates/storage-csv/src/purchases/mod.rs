//! CSV storage implementation for active purchases.

mod model;
mod repository;

pub use model::PurchaseRow;
pub use repository::PurchaseRepository;
