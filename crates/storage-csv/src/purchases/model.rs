//! File row model for active purchases.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::CsvTable;
use tickerbook_core::purchases::ActivePurchase;

/// One line of `purchases.csv`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRow {
    pub id: String,
    pub name: String,
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub target_price: f64,
    pub quantity: u32,
}

impl CsvTable for PurchaseRow {
    const HEADERS: &'static [&'static str] =
        &["id", "name", "buyDate", "buyPrice", "targetPrice", "quantity"];
}

impl From<PurchaseRow> for ActivePurchase {
    fn from(row: PurchaseRow) -> Self {
        ActivePurchase {
            id: row.id,
            name: row.name,
            buy_date: row.buy_date,
            buy_price: row.buy_price,
            target_price: row.target_price,
            quantity: row.quantity,
        }
    }
}

impl From<ActivePurchase> for PurchaseRow {
    fn from(purchase: ActivePurchase) -> Self {
        PurchaseRow {
            id: purchase.id,
            name: purchase.name,
            buy_date: purchase.buy_date,
            buy_price: purchase.buy_price,
            target_price: purchase.target_price,
            quantity: purchase.quantity,
        }
    }
}
