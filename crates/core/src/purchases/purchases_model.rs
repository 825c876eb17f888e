//! Purchase domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldErrorsBuilder, Result};

/// Domain model representing an open, unsold stock holding.
///
/// Purchases are never edited. They leave the store only when sold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivePurchase {
    pub id: String,
    pub name: String,
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    /// Price the holder is aiming for. `0.0` means no target.
    pub target_price: f64,
    pub quantity: u32,
}

impl ActivePurchase {
    /// Cost basis: buy price times quantity.
    pub fn buy_value(&self) -> f64 {
        self.buy_price * f64::from(self.quantity)
    }

    pub fn has_target(&self) -> bool {
        self.target_price > 0.0
    }
}

/// Input model for recording a new purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub name: String,
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    #[serde(default)]
    pub target_price: Option<f64>,
    pub quantity: i64,
}

impl NewPurchase {
    /// Validates the input against the known stock names and today's date.
    pub fn validate(&self, known_names: &[String], today: NaiveDate) -> Result<()> {
        let mut errors = FieldErrorsBuilder::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Stock name is required");
        } else if !known_names.iter().any(|known| known == name) {
            errors.add("name", format!("Unknown stock '{}'", name));
        }

        if self.buy_date > today {
            errors.add("buyDate", "Buy date cannot be in the future");
        }

        if !self.buy_price.is_finite() || self.buy_price <= 0.0 {
            errors.add("buyPrice", "Buy price must be greater than 0");
        }

        if let Some(target) = self.target_price {
            if !target.is_finite() || target < 0.0 {
                errors.add("targetPrice", "Target price cannot be negative");
            }
        }

        if self.quantity <= 0 {
            errors.add("quantity", "Quantity must be at least 1");
        } else if self.quantity > i64::from(u32::MAX) {
            errors.add("quantity", "Quantity is too large");
        }

        errors.finish("Invalid purchase")
    }

    /// Builds the stored record. Call [`NewPurchase::validate`] first.
    pub fn into_purchase(self, id: String) -> ActivePurchase {
        ActivePurchase {
            id,
            name: self.name.trim().to_string(),
            buy_date: self.buy_date,
            buy_price: self.buy_price,
            target_price: self.target_price.unwrap_or(0.0),
            quantity: u32::try_from(self.quantity).unwrap_or(0),
        }
    }
}
