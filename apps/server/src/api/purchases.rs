use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::Envelope};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use tickerbook_core::{
    positions::{ClosedPosition, SaleRequest},
    purchases::{ActivePurchase, NewPurchase},
};

async fn list_purchases(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Envelope<Vec<ActivePurchase>>> {
    let purchases = state.purchase_service.get_purchases()?;
    Ok(Envelope::ok(purchases))
}

async fn create_purchase(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPurchase>, JsonRejection>,
) -> ApiResult<Envelope<ActivePurchase>> {
    let Json(new_purchase) = payload?;
    let purchase = state.purchase_service.add_purchase(new_purchase).await?;
    Ok(Envelope::ok(purchase))
}

async fn sell_purchase(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaleRequest>, JsonRejection>,
) -> ApiResult<Envelope<ClosedPosition>> {
    let Json(sale) = payload?;
    let closed = state.closed_position_service.sell_purchase(&id, sale).await?;
    Ok(Envelope::ok(closed))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/purchases", get(list_purchases).post(create_purchase))
        .route("/purchases/{id}/sell", post(sell_purchase))
}
