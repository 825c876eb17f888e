use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{DeletedId, Envelope},
};
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
};
use tickerbook_core::positions::{ClosedPosition, PositionsSummary};

async fn list_closed_positions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Envelope<Vec<ClosedPosition>>> {
    let positions = state.closed_position_service.get_closed_positions()?;
    Ok(Envelope::ok(positions))
}

async fn get_positions_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Envelope<PositionsSummary>> {
    let summary = state.closed_position_service.get_summary()?;
    Ok(Envelope::ok(summary))
}

async fn delete_closed_position(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Envelope<DeletedId>> {
    state.closed_position_service.delete_closed_position(&id).await?;
    Ok(Envelope::ok(DeletedId { id }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/positions", get(list_closed_positions))
        .route("/positions/summary", get(get_positions_summary))
        .route("/positions/{id}", delete(delete_closed_position))
}
