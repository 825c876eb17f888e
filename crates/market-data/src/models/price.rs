use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current price per stock name.
///
/// Ordered so that name listings and serialized snapshots are stable.
pub type PriceMap = BTreeMap<String, f64>;

/// Prices as returned by a single provider fetch.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    /// Price per stock name
    pub prices: PriceMap,

    /// When the provider produced these prices
    pub fetched_at: DateTime<Utc>,

    /// Provider that produced the snapshot (SPREADSHEET, MOCK)
    pub source: String,
}

impl PriceSnapshot {
    pub fn new(prices: PriceMap, source: impl Into<String>) -> Self {
        Self {
            prices,
            fetched_at: Utc::now(),
            source: source.into(),
        }
    }

    /// An empty snapshot. Every lookup against it misses.
    pub fn empty(source: impl Into<String>) -> Self {
        Self::new(PriceMap::new(), source)
    }

    /// Known stock names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.prices.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_sorted() {
        let mut prices = PriceMap::new();
        prices.insert("TCS".to_string(), 3500.0);
        prices.insert("INFY".to_string(), 1500.5);
        let snapshot = PriceSnapshot::new(prices, "MOCK");

        assert_eq!(snapshot.names(), vec!["INFY".to_string(), "TCS".to_string()]);
        assert!(!snapshot.is_empty());
        assert!(PriceSnapshot::empty("MOCK").is_empty());
    }
}
