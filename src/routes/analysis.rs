use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::AnalysisResponse;
use crate::services::analysis_service;
use crate::state::AppState;

const MIN_WINDOW: usize = 2;
const MAX_WINDOW: usize = 120;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_analysis))
}

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Catalog display name, e.g. "Larsen & Toubro"
    company: String,

    /// Moving-average window in trading days (default: configured window)
    window: Option<usize>,
}

/// Trend signal and chart series for one catalog company.
///
/// # Example
/// ```text
/// GET /api/analysis?company=HDFC%20Bank&window=20
/// ```
pub async fn get_analysis(
    Query(query): Query<AnalysisQuery>,
    State(state): State<AppState>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let window = query.window.unwrap_or(state.analysis.window);
    info!("GET /api/analysis - company={:?}, window={}", query.company, window);

    if !(MIN_WINDOW..=MAX_WINDOW).contains(&window) {
        error!("Invalid window: {}. Must be between {} and {}.", window, MIN_WINDOW, MAX_WINDOW);
        return Err(AppError::Validation(format!(
            "Invalid window. Must be between {} and {} trading days.",
            MIN_WINDOW, MAX_WINDOW
        )));
    }

    let response = analysis_service::analyze(
        &state.catalog,
        state.price_provider.as_ref(),
        &state.analysis,
        &query.company,
        window,
    )
    .await?;

    Ok(Json(response))
}
