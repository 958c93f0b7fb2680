use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use sectorfolio_core::StockSnapshot;

use crate::main_lib::AppState;

/// Ad-hoc lookup of one symbol against both providers.
async fn get_stock(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Json<StockSnapshot> {
    Json(state.portfolio_service.get_stock_snapshot(&symbol).await)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stock/{symbol}", get(get_stock))
}
