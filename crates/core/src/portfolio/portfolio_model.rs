//! Portfolio view models. Computed on every request, never persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An active purchase enriched with its current valuation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub name: String,
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub target_price: f64,
    pub quantity: u32,
    pub buy_value: f64,
    /// `0.0` when no price is known for the name.
    pub current_price: f64,
    pub current_value: f64,
    pub gain_loss: f64,
    pub gain_loss_percent: f64,
    pub days_since_buy: i64,
    /// Value still to gain before the target is reached. Only set while
    /// a target exists and the current price is below it.
    pub remaining_gain: Option<f64>,
    /// Share of the portfolio's current value, in percent.
    pub portfolio_weightage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub total_buy_value: f64,
    pub total_current_value: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
}

/// Everything the portfolio page shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub items: Vec<PortfolioItem>,
    pub totals: PortfolioTotals,
    /// When the prices used were fetched. `None` if no prices were available.
    pub prices_as_of: Option<DateTime<Utc>>,
    pub price_source: Option<String>,
}
