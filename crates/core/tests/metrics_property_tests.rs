//! Property-based integration tests for the portfolio metrics engine.
//!
//! These tests verify that the valuation and settlement arithmetic holds its
//! invariants across random purchases and prices, using the `proptest` crate
//! for random test case generation.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use tickerbook_core::portfolio::metrics::{
    compute_portfolio_view_as_of, portfolio_totals, settle_sale,
};
use tickerbook_core::ActivePurchase;
use tickerbook_market_data::PriceMap;

// =============================================================================
// Generators
// =============================================================================

const NAMES: [&str; 4] = ["TCS", "INFY", "HDFCBANK", "ITC"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
}

/// Generates a purchase on one of a few names. Target may be zero (no target).
fn arb_purchase() -> impl Strategy<Value = ActivePurchase> {
    (
        "[a-f0-9]{12}",
        0usize..NAMES.len(),
        0i64..1000,
        0.01f64..10_000.0,
        prop_oneof![Just(0.0f64), 0.01f64..20_000.0],
        1u32..5_000,
    )
        .prop_map(|(id, name, offset, buy_price, target_price, quantity)| ActivePurchase {
            id,
            name: NAMES[name].to_string(),
            buy_date: base_date() + Duration::days(offset),
            buy_price,
            target_price,
            quantity,
        })
}

/// Generates prices for a subset of the names, some possibly zero.
fn arb_prices() -> impl Strategy<Value = PriceMap> {
    proptest::collection::btree_map(
        (0usize..NAMES.len()).prop_map(|i| NAMES[i].to_string()),
        prop_oneof![Just(0.0f64), 0.01f64..20_000.0],
        0..=NAMES.len(),
    )
}

// =============================================================================
// Portfolio view
// =============================================================================

proptest! {
    /// Weightages add up to 100 when anything is held at a positive value,
    /// and are all zero otherwise.
    #[test]
    fn prop_weightages_sum_to_hundred_or_zero(
        purchases in proptest::collection::vec(arb_purchase(), 0..20),
        prices in arb_prices(),
    ) {
        let items = compute_portfolio_view_as_of(&purchases, &prices, base_date());
        let total_value: f64 = items.iter().map(|i| i.current_value).sum();
        let weight_sum: f64 = items.iter().map(|i| i.portfolio_weightage).sum();

        if total_value > 0.0 {
            prop_assert!((weight_sum - 100.0).abs() < 1e-6, "sum was {}", weight_sum);
        } else {
            prop_assert!(items.iter().all(|i| i.portfolio_weightage == 0.0));
        }
    }

    /// Remaining gain is present exactly when a target exists above the current price.
    #[test]
    fn prop_remaining_gain_only_below_target(
        purchases in proptest::collection::vec(arb_purchase(), 1..10),
        prices in arb_prices(),
    ) {
        let items = compute_portfolio_view_as_of(&purchases, &prices, base_date());
        for item in &items {
            let expected = item.target_price > 0.0 && item.target_price > item.current_price;
            prop_assert_eq!(item.remaining_gain.is_some(), expected);
            if let Some(remaining) = item.remaining_gain {
                prop_assert!(remaining > 0.0);
            }
        }
    }

    /// Every ratio in the view is a real number.
    #[test]
    fn prop_view_has_no_nan(
        purchases in proptest::collection::vec(arb_purchase(), 0..20),
        prices in arb_prices(),
    ) {
        let items = compute_portfolio_view_as_of(&purchases, &prices, base_date());
        for item in &items {
            prop_assert!(!item.gain_loss_percent.is_nan());
            prop_assert!(!item.portfolio_weightage.is_nan());
        }
        let totals = portfolio_totals(&items);
        prop_assert!(!totals.total_gain_loss_percent.is_nan());
        prop_assert!((totals.total_gain_loss
            - (totals.total_current_value - totals.total_buy_value)).abs() < 1e-6);
    }

    /// Items keep the order and identity of the purchases they value.
    #[test]
    fn prop_view_preserves_purchase_order(
        purchases in proptest::collection::vec(arb_purchase(), 0..20),
        prices in arb_prices(),
    ) {
        let items = compute_portfolio_view_as_of(&purchases, &prices, base_date());
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        let expected: Vec<&str> = purchases.iter().map(|p| p.id.as_str()).collect();
        prop_assert_eq!(ids, expected);
    }
}

// =============================================================================
// Sale settlement
// =============================================================================

proptest! {
    /// Settling the same sale twice gives bit-identical results.
    #[test]
    fn prop_settle_sale_is_deterministic(
        purchase in arb_purchase(),
        sell_offset in -30i64..2000,
        sell_price in 0.01f64..20_000.0,
    ) {
        let sell_date = purchase.buy_date + Duration::days(sell_offset);
        let first = settle_sale(&purchase, sell_date, sell_price);
        let second = settle_sale(&purchase, sell_date, sell_price);

        prop_assert_eq!(first.percent_gain.to_bits(), second.percent_gain.to_bits());
        prop_assert_eq!(first, second);
    }

    /// Days held follows the calendar, including sales dated before the purchase.
    #[test]
    fn prop_days_held_matches_date_difference(
        purchase in arb_purchase(),
        sell_offset in -30i64..2000,
        sell_price in 0.01f64..20_000.0,
    ) {
        let sell_date = purchase.buy_date + Duration::days(sell_offset);
        let closed = settle_sale(&purchase, sell_date, sell_price);

        prop_assert_eq!(closed.days_held, sell_offset);
        if sell_offset < 0 {
            prop_assert_eq!(closed.annualized_gain_percent, None);
        }
    }

    /// Gain is sell value minus buy value, and percent gain is finite for a
    /// positive cost basis.
    #[test]
    fn prop_gain_is_consistent(
        purchase in arb_purchase(),
        sell_offset in 0i64..2000,
        sell_price in 0.01f64..20_000.0,
    ) {
        let sell_date = purchase.buy_date + Duration::days(sell_offset);
        let closed = settle_sale(&purchase, sell_date, sell_price);

        prop_assert!((closed.gain - (closed.sell_value - closed.buy_value)).abs() < 1e-6);
        prop_assert!(closed.percent_gain.is_finite());
        prop_assert_eq!(closed.quantity, purchase.quantity);
        prop_assert_eq!(&closed.id, &purchase.id);
    }
}
