//! Tickerbook Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Tickerbook: recording
//! purchases, valuing them against current prices, and settling sales into
//! the closed-positions ledger. It is storage-agnostic and defines traits
//! that are implemented by the `storage-csv` crate.

pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod positions;
pub mod purchases;
pub mod quotes;
pub mod utils;

// Re-export common types
pub use portfolio::*;
pub use positions::{ClosedPosition, PositionsSummary, SaleRequest};
pub use purchases::{ActivePurchase, NewPurchase};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
