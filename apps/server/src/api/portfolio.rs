use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use sectorfolio_core::PortfolioReport;

use crate::error::ApiResult;
use crate::main_lib::AppState;

/// Run the full enrichment pipeline and return the report.
///
/// Holdings are enriched sequentially with the pacing interval between
/// them, so response time grows with portfolio size. Provider outages
/// degrade the data, never the response; only a holdings load failure
/// becomes an error here.
async fn get_portfolio(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioReport>> {
    let report = state.portfolio_service.get_enriched_portfolio().await?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/portfolio", get(get_portfolio))
}
