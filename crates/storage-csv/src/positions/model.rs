//! File row model for closed positions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::CsvTable;
use tickerbook_core::positions::ClosedPosition;

/// One line of `closed_positions.csv`.
///
/// An absent annualized gain is an empty field. An infinite percent gain is
/// written as `inf`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClosedPositionRow {
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
    pub days_held: i64,
    pub percent_gain: f64,
    pub annualized_gain_percent: Option<f64>,
}

impl CsvTable for ClosedPositionRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "buyDate",
        "buyPrice",
        "quantity",
        "buyValue",
        "sellDate",
        "sellPrice",
        "sellValue",
        "gain",
        "daysHeld",
        "percentGain",
        "annualizedGainPercent",
    ];
}

impl From<ClosedPositionRow> for ClosedPosition {
    fn from(row: ClosedPositionRow) -> Self {
        ClosedPosition {
            id: row.id,
            name: row.name,
            buy_date: row.buy_date,
            buy_price: row.buy_price,
            quantity: row.quantity,
            buy_value: row.buy_value,
            sell_date: row.sell_date,
            sell_price: row.sell_price,
            sell_value: row.sell_value,
            gain: row.gain,
            days_held: row.days_held,
            percent_gain: row.percent_gain,
            annualized_gain_percent: row.annualized_gain_percent,
        }
    }
}

impl From<ClosedPosition> for ClosedPositionRow {
    fn from(position: ClosedPosition) -> Self {
        ClosedPositionRow {
            id: position.id,
            name: position.name,
            buy_date: position.buy_date,
            buy_price: position.buy_price,
            quantity: position.quantity,
            buy_value: position.buy_value,
            sell_date: position.sell_date,
            sell_price: position.sell_price,
            sell_value: position.sell_value,
            gain: position.gain,
            days_held: position.days_held,
            percent_gain: position.percent_gain,
            annualized_gain_percent: position.annualized_gain_percent,
        }
    }
}
