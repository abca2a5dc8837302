use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::spot_controller::SpotController;
use crate::dto::spot_dto::{CreateSpotRequest, SpotResponse, UpdateSpotRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_spot_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_spots).post(create_spot))
        .route("/:id", get(get_spot).put(update_spot).delete(delete_spot))
}

async fn list_spots(State(state): State<AppState>) -> Result<Json<Vec<SpotResponse>>, AppError> {
    let controller = SpotController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_spot(
    State(state): State<AppState>,
    Json(request): Json<CreateSpotRequest>,
) -> Result<(StatusCode, Json<SpotResponse>), AppError> {
    let controller = SpotController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_spot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SpotResponse>, AppError> {
    let controller = SpotController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_spot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSpotRequest>,
) -> Result<Json<SpotResponse>, AppError> {
    let controller = SpotController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_spot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let controller = SpotController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
