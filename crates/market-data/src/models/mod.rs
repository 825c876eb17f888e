//! Market data models
//!
//! - `price` - Price map and the timestamped snapshot returned by providers

mod price;

pub use price::{PriceMap, PriceSnapshot};
