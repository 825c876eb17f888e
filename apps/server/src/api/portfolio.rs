use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::Envelope};
use axum::{extract::State, routing::get, Router};
use tickerbook_core::portfolio::PortfolioView;

async fn get_portfolio(State(state): State<Arc<AppState>>) -> ApiResult<Envelope<PortfolioView>> {
    let view = state.portfolio_service.get_portfolio_view().await?;
    Ok(Envelope::ok(view))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/portfolio", get(get_portfolio))
}
