//! Price provider abstractions and implementations.
//!
//! This module contains:
//! - The `PriceProvider` trait that all providers implement
//! - The published-spreadsheet provider
//! - The random-walk mock provider

mod traits;

pub mod mock;
pub mod spreadsheet;

pub use traits::PriceProvider;
