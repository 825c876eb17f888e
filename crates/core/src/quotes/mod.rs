//! Price lookup module.
//!
//! - [`price_service`] - Cached access to the configured price provider
//!
//! # Architecture
//!
//! ```text
//! PortfolioService / PurchaseService → PriceService (cache) → market-data crate (provider)
//! ```
//!
//! The cache serves one snapshot until it is older than the refresh interval.
//! When a refresh fails and an older snapshot exists, the older snapshot is
//! served instead.

pub mod price_service;

#[cfg(test)]
mod price_service_tests;

pub use price_service::{PriceService, PriceServiceTrait};
