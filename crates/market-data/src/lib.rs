//! Tickerbook Market Data Crate
//!
//! This crate provides the price sources that back the portfolio view.
//!
//! # Overview
//!
//! A price source answers a single question: "what is the current price of
//! every stock you know about?". The answer is a [`PriceSnapshot`], a mapping
//! from stock name to price stamped with the time it was fetched.
//!
//! Two providers are available:
//! - [`SpreadsheetPriceProvider`] - downloads the CSV export of a published
//!   spreadsheet and reads a name column and a price column from it
//! - [`MockPriceProvider`] - keeps an in-memory random walk per stock name,
//!   useful for demos and tests
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  Price cache     | --> |  PriceProvider   |  (spreadsheet, mock)
//! |  (core crate)    |     +------------------+
//! +------------------+              |
//!                                   v
//!                          +------------------+
//!                          |  PriceSnapshot   |  (name -> price)
//!                          +------------------+
//! ```
//!
//! Caching and staleness are handled by the consumer; providers always fetch.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{PriceMap, PriceSnapshot};
pub use provider::mock::MockPriceProvider;
pub use provider::spreadsheet::SpreadsheetPriceProvider;
pub use provider::PriceProvider;
