//! Portfolio valuation and position-lifecycle arithmetic.
//!
//! Every function here is pure: no storage, no logging side effects beyond
//! `debug!`, and no clock reads except in the thin wrappers that supply
//! "now" to their `*_as_of` / `*_at` counterparts.
//!
//! Ratios never divide by zero. Each one guards its denominator and falls
//! back to `0.0`, `None`, or (for a realized percent gain on a zero cost
//! basis) `f64::INFINITY`.

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;

use crate::constants::{DAYS_PER_YEAR, DAYS_PER_YEAR_CAGR};
use crate::portfolio::portfolio_model::{PortfolioItem, PortfolioTotals};
use crate::positions::{ClosedPosition, PositionsSummary};
use crate::purchases::ActivePurchase;
use crate::utils::time_utils;
use tickerbook_market_data::PriceMap;

/// Joins purchases with current prices, using today as the valuation date.
///
/// See [`compute_portfolio_view_as_of`].
pub fn compute_portfolio_view(purchases: &[ActivePurchase], prices: &PriceMap) -> Vec<PortfolioItem> {
    compute_portfolio_view_as_of(purchases, prices, time_utils::today())
}

/// Joins purchases with current prices as of `today`.
///
/// A name missing from `prices` is valued at `0.0`. Items keep the order of
/// `purchases`. Weightages are shares of the summed current value and are
/// all `0.0` when that sum is zero.
pub fn compute_portfolio_view_as_of(
    purchases: &[ActivePurchase],
    prices: &PriceMap,
    today: NaiveDate,
) -> Vec<PortfolioItem> {
    let mut items: Vec<PortfolioItem> = purchases
        .iter()
        .map(|purchase| {
            let current_price = prices.get(&purchase.name).copied().unwrap_or_else(|| {
                debug!("No price for {}; valuing at zero", purchase.name);
                0.0
            });
            value_purchase(purchase, current_price, today)
        })
        .collect();

    let total_current_value: f64 = items.iter().map(|item| item.current_value).sum();
    for item in &mut items {
        item.portfolio_weightage = percent_or_zero(item.current_value, total_current_value);
    }

    items
}

/// Values a single purchase at `current_price`. Weightage is left at zero.
fn value_purchase(purchase: &ActivePurchase, current_price: f64, today: NaiveDate) -> PortfolioItem {
    let quantity = f64::from(purchase.quantity);
    let buy_value = purchase.buy_value();
    let current_value = current_price * quantity;
    let gain_loss = current_value - buy_value;

    let remaining_gain = (purchase.has_target() && purchase.target_price > current_price)
        .then(|| (purchase.target_price - current_price) * quantity);

    PortfolioItem {
        id: purchase.id.clone(),
        name: purchase.name.clone(),
        buy_date: purchase.buy_date,
        buy_price: purchase.buy_price,
        target_price: purchase.target_price,
        quantity: purchase.quantity,
        buy_value,
        current_price,
        current_value,
        gain_loss,
        gain_loss_percent: percent_or_zero(gain_loss, buy_value),
        days_since_buy: time_utils::days_between(purchase.buy_date, today),
        remaining_gain,
        portfolio_weightage: 0.0,
    }
}

/// Totals over a computed portfolio view.
pub fn portfolio_totals(items: &[PortfolioItem]) -> PortfolioTotals {
    let total_buy_value: f64 = items.iter().map(|item| item.buy_value).sum();
    let total_current_value: f64 = items.iter().map(|item| item.current_value).sum();
    let total_gain_loss = total_current_value - total_buy_value;

    PortfolioTotals {
        total_buy_value,
        total_current_value,
        total_gain_loss,
        total_gain_loss_percent: percent_or_zero(total_gain_loss, total_buy_value),
    }
}

/// Settles the sale of `purchase` at `sell_price` on `sell_date`.
///
/// `sell_date` may precede the buy date; days held is then negative and is
/// carried through unchanged. The purchase's target price is not copied.
pub fn settle_sale(purchase: &ActivePurchase, sell_date: NaiveDate, sell_price: f64) -> ClosedPosition {
    let quantity = f64::from(purchase.quantity);
    let buy_value = purchase.buy_value();
    let sell_value = sell_price * quantity;
    let gain = sell_value - buy_value;
    let days_held = time_utils::days_between(purchase.buy_date, sell_date);

    let percent_gain = if buy_value > 0.0 {
        gain / buy_value * 100.0
    } else if sell_value > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    let annualized_gain_percent = if buy_value > 0.0 {
        annualize(percent_gain, days_held)
    } else {
        None
    };

    ClosedPosition {
        id: purchase.id.clone(),
        name: purchase.name.clone(),
        buy_date: purchase.buy_date,
        buy_price: purchase.buy_price,
        quantity: purchase.quantity,
        buy_value,
        sell_date,
        sell_price,
        sell_value,
        gain,
        days_held,
        percent_gain,
        annualized_gain_percent,
    }
}

/// Linear annualization of a realized percent gain.
///
/// A same-day trade with a non-zero gain is scaled by a full year.
fn annualize(percent_gain: f64, days_held: i64) -> Option<f64> {
    if days_held > 0 {
        Some(percent_gain / days_held as f64 * DAYS_PER_YEAR)
    } else if days_held == 0 && percent_gain != 0.0 {
        Some(percent_gain * DAYS_PER_YEAR)
    } else {
        None
    }
}

/// Realized totals over `closed`, with CAGR measured from `cagr_start` to now.
pub fn aggregate_positions(closed: &[ClosedPosition], cagr_start: NaiveDate) -> PositionsSummary {
    aggregate_positions_at(closed, time_utils::start_of_day_utc(cagr_start), Utc::now())
}

/// Realized totals over `closed`, with CAGR measured from `cagr_start` to `now`.
///
/// Elapsed time is fractional days over [`DAYS_PER_YEAR_CAGR`]. CAGR is only
/// reported for a positive buy total, a positive elapsed time, and a
/// non-negative sell/buy ratio.
pub fn aggregate_positions_at(
    closed: &[ClosedPosition],
    cagr_start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> PositionsSummary {
    let total_buy_value: f64 = closed.iter().map(|position| position.buy_value).sum();
    let total_sell_value: f64 = closed.iter().map(|position| position.sell_value).sum();
    let total_profit = total_sell_value - total_buy_value;

    let overall_pnl_percent =
        (total_buy_value > 0.0).then(|| total_profit / total_buy_value * 100.0);

    let elapsed_days = time_utils::fractional_days_between(cagr_start, now);
    let cagr = if total_buy_value > 0.0 && elapsed_days > 0.0 {
        let ratio = total_sell_value / total_buy_value;
        (ratio >= 0.0).then(|| {
            let years = elapsed_days / DAYS_PER_YEAR_CAGR;
            (ratio.powf(1.0 / years) - 1.0) * 100.0
        })
    } else {
        None
    };

    PositionsSummary {
        total_buy_value,
        total_sell_value,
        total_profit,
        overall_pnl_percent,
        cagr,
    }
}

/// `part / whole * 100`, or `0.0` when `whole` is not positive.
fn percent_or_zero(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
