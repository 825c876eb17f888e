//! Background scheduler that keeps the price cache warm.
//!
//! Refreshes on the configured staleness window so page loads rarely wait on
//! the price source.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::main_lib::AppState;

/// Starts the background price refresh loop. A zero period disables it.
pub fn start_price_refresh_scheduler(state: Arc<AppState>, period: Duration) {
    if period.is_zero() {
        debug!("Price refresh scheduler disabled");
        return;
    }

    tokio::spawn(async move {
        info!("Price refresh scheduler started ({}s interval)", period.as_secs());

        // First tick is immediate, which also primes the cache at startup.
        let mut refresh_interval = interval(period);
        refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            refresh_interval.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

async fn run_scheduled_refresh(state: &Arc<AppState>) {
    match state.price_service.refresh_prices().await {
        Ok(snapshot) => debug!(
            "Scheduled price refresh: {} names from {}",
            snapshot.prices.len(),
            snapshot.source
        ),
        Err(e) => warn!("Scheduled price refresh failed: {}", e),
    }
}
