//! Closed position domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldErrorsBuilder, Result};

/// Domain model for a settled sale.
///
/// Built once from an active purchase and the sale inputs; never edited.
/// `percent_gain` is `+inf` when the buy value is zero and the sell value
/// is positive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClosedPosition {
    pub id: String,
    pub name: String,
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub quantity: u32,
    pub buy_value: f64,
    pub sell_date: NaiveDate,
    pub sell_price: f64,
    pub sell_value: f64,
    pub gain: f64,
    /// Negative when the sale is dated before the purchase.
    pub days_held: i64,
    pub percent_gain: f64,
    pub annualized_gain_percent: Option<f64>,
}

/// Input model for selling an active purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub sell_date: NaiveDate,
    pub sell_price: f64,
}

impl SaleRequest {
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        let mut errors = FieldErrorsBuilder::new();

        if self.sell_date > today {
            errors.add("sellDate", "Sell date cannot be in the future");
        }
        if !self.sell_price.is_finite() || self.sell_price <= 0.0 {
            errors.add("sellPrice", "Sell price must be greater than 0");
        }

        errors.finish("Invalid sale")
    }
}

/// Realized totals across all closed positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionsSummary {
    pub total_buy_value: f64,
    pub total_sell_value: f64,
    pub total_profit: f64,
    pub overall_pnl_percent: Option<f64>,
    pub cagr: Option<f64>,
}
