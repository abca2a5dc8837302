use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::stats_dto::DashboardStatsResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/stats", get(dashboard_stats))
}

async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStatsResponse>, AppError> {
    let controller = DashboardController::new(state.pool.clone(), state.clock.clone());
    let response = controller.stats().await?;
    Ok(Json(response))
}
