use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::models::StockListItem;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_stocks))
}

/// Catalog entries in the order the dashboard lists them.
pub async fn list_stocks(State(state): State<AppState>) -> Json<Vec<StockListItem>> {
    info!("GET /api/stocks - Listing {} catalog entries", state.catalog.len());
    Json(state.catalog.entries().iter().map(StockListItem::from).collect())
}
