//! CSV file storage implementation for Tickerbook.
//!
//! This crate provides all file-related functionality for the ledgers kept by
//! `tickerbook-core`. It implements the repository traits defined there and
//! contains:
//! - Data directory initialization and table file paths
//! - A single writer actor that serializes every read-modify-write
//! - Repository implementations for active purchases and closed positions
//! - Row types mirroring the on-disk column layout
//!
//! # Architecture
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!    storage-csv (this crate)
//!              │
//!              ▼
//!   purchases.csv  closed_positions.csv
//! ```
//!
//! Reads go straight to the files. Writes rewrite a whole file through a
//! temporary sibling that is renamed into place, so readers only ever see a
//! complete file.

pub mod db;
pub mod errors;

// Repository implementations
pub mod positions;
pub mod purchases;

pub use db::{init, spawn_writer, StorePaths, WriteHandle};
pub use errors::{IntoCore, StorageError};
pub use positions::ClosedPositionRepository;
pub use purchases::PurchaseRepository;

// Re-export from tickerbook-core for convenience
pub use tickerbook_core::errors::{DatabaseError, Error, Result};
