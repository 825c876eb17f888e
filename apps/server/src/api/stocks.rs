use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::Envelope};
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use tickerbook_market_data::PriceSnapshot;

/// Names accepted when recording a purchase.
async fn list_stocks(State(state): State<Arc<AppState>>) -> ApiResult<Envelope<Vec<String>>> {
    let names = state.price_service.get_known_names().await?;
    Ok(Envelope::ok(names))
}

/// Forces a price fetch regardless of cache age.
async fn refresh_prices(State(state): State<Arc<AppState>>) -> ApiResult<Envelope<PriceSnapshot>> {
    let snapshot = state.price_service.refresh_prices().await?;
    tracing::info!(
        "Prices refreshed from {}: {} names",
        snapshot.source,
        snapshot.prices.len()
    );
    Ok(Envelope::ok(snapshot))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks", get(list_stocks))
        .route("/prices/refresh", post(refresh_prices))
}
